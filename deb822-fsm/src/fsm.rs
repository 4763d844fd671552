//! A small deterministic automaton over classified tokens.
//!
//! States own an ordered list of guarded transitions; the first transition
//! whose guard accepts the current token is taken. A transition may append
//! the token to the automaton's buffer, fire an action on the in-progress
//! draft, and either move to another state or to the terminal state, which
//! stops matching before the end of the input.
//!
//! The draft is whatever the automaton is building while it runs. Actions get
//! mutable access to the draft and the buffer; once a match completes the
//! caller takes the draft by value.
use crate::lex::{Token, TokenKind};

/// Identity of a state within one automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

/// Where a transition leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Another state of the same automaton.
    State(StateId),
    /// The terminal state; matching stops when it is reached.
    Terminal,
}

/// A predicate over a single token.
#[derive(Debug, Clone, Copy)]
pub enum Guard {
    /// Accept tokens of the given class.
    Kind(TokenKind),
    /// Accept exactly this character.
    Char(char),
    /// Accept tokens of any of the given classes.
    OneOf(&'static [TokenKind]),
    /// Accept tokens for which the function returns true.
    Custom(fn(&Token) -> bool),
}

impl Guard {
    /// Check whether this guard accepts `token`.
    pub fn accepts(&self, token: &Token) -> bool {
        match self {
            Guard::Kind(kind) => token.kind == *kind,
            Guard::Char(c) => token.value == *c,
            Guard::OneOf(kinds) => kinds.contains(&token.kind),
            Guard::Custom(f) => f(token),
        }
    }
}

/// The text accumulated by buffered transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer(String);

impl Buffer {
    /// Append a character.
    pub fn push(&mut self, c: char) {
        self.0.push(c);
    }

    /// Return the accumulated text and clear the buffer.
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.0)
    }

    /// View the accumulated text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Side effect fired when a transition is taken, or when input runs out.
pub type Action<D> = fn(&mut D, &mut Buffer);

struct Transition<D> {
    guard: Guard,
    buffered: bool,
    target: Target,
    action: Option<Action<D>>,
}

struct State<D> {
    transitions: Vec<Transition<D>>,
}

/// How a successful match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// The terminal state was reached. `offset` is the index of the token
    /// that triggered the final transition; that token is not consumed.
    Terminal {
        /// Index of the first unconsumed token.
        offset: usize,
    },
    /// All input was consumed.
    Exhausted {
        /// Number of tokens consumed.
        consumed: usize,
    },
}

impl Match {
    /// Number of tokens consumed by the match.
    pub fn consumed(&self) -> usize {
        match self {
            Match::Terminal { offset } => *offset,
            Match::Exhausted { consumed } => *consumed,
        }
    }
}

/// No transition out of the current state accepted the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoTransition {
    /// Index of the rejected token in the input.
    pub offset: usize,
    /// The rejected token.
    pub token: Token,
    /// The state the automaton was in.
    pub state: StateId,
}

impl std::fmt::Display for NoTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "no transition for {:?} at offset {}",
            self.token.value, self.offset
        )
    }
}

impl std::error::Error for NoTransition {}

/// A deterministic automaton building a draft of type `D`.
pub struct Fsm<D> {
    states: Vec<State<D>>,
    initial: StateId,
    current: StateId,
    buffer: Buffer,
    finished: bool,
    eof: Option<Action<D>>,
    draft: D,
}

impl<D: Default> Default for Fsm<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Default> Fsm<D> {
    /// Create an automaton with a single, initial state.
    pub fn new() -> Self {
        Fsm {
            states: vec![State {
                transitions: Vec::new(),
            }],
            initial: StateId(0),
            current: StateId(0),
            buffer: Buffer::default(),
            finished: false,
            eof: None,
            draft: D::default(),
        }
    }

    /// The state matching starts from.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// The state the automaton is currently in.
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Whether the terminal state has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Add a fresh state without transitions.
    pub fn new_state(&mut self) -> StateId {
        self.states.push(State {
            transitions: Vec::new(),
        });
        StateId(self.states.len() - 1)
    }

    /// Add a transition that does not buffer the token.
    pub fn add_transition(&mut self, src: StateId, dest: StateId, guard: Guard) {
        self.push(src, guard, false, Target::State(dest), None);
    }

    /// Add a transition that appends the token to the buffer.
    pub fn add_buffered_transition(&mut self, src: StateId, dest: StateId, guard: Guard) {
        self.push(src, guard, true, Target::State(dest), None);
    }

    /// Add a transition that fires `action` when taken.
    ///
    /// The action runs before the token is buffered, so a flush inside the
    /// action never sees the token that triggered it.
    pub fn add_transition_with(
        &mut self,
        src: StateId,
        dest: StateId,
        guard: Guard,
        buffered: bool,
        action: Action<D>,
    ) {
        self.push(src, guard, buffered, Target::State(dest), Some(action));
    }

    /// Add, from each of `sources`, a transition to the terminal state.
    pub fn add_final_transition(
        &mut self,
        guard: Guard,
        on_fire: Option<Action<D>>,
        sources: &[StateId],
    ) {
        for src in sources {
            self.push(*src, guard, false, Target::Terminal, on_fire);
        }
    }

    /// Register the action fired when input runs out before the terminal
    /// state is reached.
    pub fn on_eof(&mut self, action: Action<D>) {
        self.eof = Some(action);
    }

    fn push(
        &mut self,
        src: StateId,
        guard: Guard,
        buffered: bool,
        target: Target,
        action: Option<Action<D>>,
    ) {
        self.states[src.0].transitions.push(Transition {
            guard,
            buffered,
            target,
            action,
        });
    }

    /// Return the accumulated text and clear the buffer.
    pub fn flush(&mut self) -> String {
        self.buffer.flush()
    }

    /// View the accumulated text.
    pub fn buffer(&self) -> &str {
        self.buffer.as_str()
    }

    /// The in-progress draft.
    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Take the draft, leaving a fresh one behind.
    pub fn take_draft(&mut self) -> D {
        std::mem::take(&mut self.draft)
    }

    /// Consume the automaton, returning its draft.
    pub fn into_draft(self) -> D {
        self.draft
    }

    /// Return to the initial state with an empty buffer and a fresh draft.
    pub fn reset(&mut self) {
        self.current = self.initial;
        self.buffer = Buffer::default();
        self.finished = false;
        self.draft = D::default();
    }

    /// Feed a single token.
    ///
    /// Returns `Some(target)` for the transition taken, or `None` if no guard
    /// accepted the token.
    pub fn step(&mut self, token: &Token) -> Option<Target> {
        let transition = self.states[self.current.0]
            .transitions
            .iter()
            .find(|t| t.guard.accepts(token))?;
        let (buffered, target, action) =
            (transition.buffered, transition.target, transition.action);

        if let Some(action) = action {
            action(&mut self.draft, &mut self.buffer);
        }
        if buffered {
            self.buffer.push(token.value);
        }
        match target {
            Target::State(dest) => self.current = dest,
            Target::Terminal => self.finished = true,
        }
        Some(target)
    }

    /// Run the automaton over `input`, starting from a clean state.
    pub fn run(&mut self, input: &[Token]) -> Result<Match, NoTransition> {
        self.reset();
        for (offset, token) in input.iter().enumerate() {
            match self.step(token) {
                Some(Target::Terminal) => return Ok(Match::Terminal { offset }),
                Some(Target::State(_)) => {}
                None => {
                    log::trace!(
                        "no transition from {:?} on {:?} at offset {}",
                        self.current,
                        token.value,
                        offset
                    );
                    return Err(NoTransition {
                        offset,
                        token: *token,
                        state: self.current,
                    });
                }
            }
        }
        if let Some(eof) = self.eof {
            eof(&mut self.draft, &mut self.buffer);
        }
        Ok(Match::Exhausted {
            consumed: input.len(),
        })
    }

    /// Find the first offset in `input` at which a match succeeds.
    ///
    /// Returns the start offset and how the match ended. Offsets in the
    /// returned [`Match`] are relative to the start offset.
    pub fn find(&mut self, input: &[Token]) -> Option<(usize, Match)> {
        (0..input.len()).find_map(|start| self.run(&input[start..]).ok().map(|m| (start, m)))
    }
}
