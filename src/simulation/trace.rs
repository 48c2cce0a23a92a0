use serde::Serialize;

/// Narrated record of one simulated game
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameTrace {
    pub opening_hand: Vec<String>,
    pub turns: Vec<TurnTrace>,
}

/// Everything that happened during a single turn
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TurnTrace {
    pub turn: u32,
    pub drew: Option<String>,
    pub land_played: Option<String>,
    pub land_missed: bool,
    pub spells_cast: u32,
    pub mana_spent: u32,
    pub color_screwed: bool,
    pub actions: Vec<String>,
}

impl TurnTrace {
    pub fn new(turn: u32) -> Self {
        TurnTrace {
            turn,
            ..TurnTrace::default()
        }
    }
}

/// Optional sink for trace events. Recording never feeds back into the game.
pub(crate) struct TraceSink<'a> {
    trace: Option<&'a mut GameTrace>,
}

impl<'a> TraceSink<'a> {
    pub(crate) fn new(trace: Option<&'a mut GameTrace>) -> Self {
        TraceSink { trace }
    }

    pub(crate) fn opening_hand<'c, I: IntoIterator<Item = &'c str>>(&mut self, names: I) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.opening_hand = names.into_iter().map(str::to_string).collect();
        }
    }

    pub(crate) fn begin_turn(&mut self, turn: u32) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.turns.push(TurnTrace::new(turn));
        }
    }

    /// Mutate the current turn record, if tracing
    pub(crate) fn turn<F: FnOnce(&mut TurnTrace)>(&mut self, f: F) {
        if let Some(turn) = self
            .trace
            .as_deref_mut()
            .and_then(|trace| trace.turns.last_mut())
        {
            f(turn);
        }
    }

    /// Lazily formatted so untraced games never build strings
    pub(crate) fn action<F: FnOnce() -> String>(&mut self, message: F) {
        self.turn(|turn| turn.actions.push(message()));
    }
}
