//! Helper contexts for nested rule sets
//!
//! # The High-Level Concept
//!
//! An inline push may carry its own nested rules. TextMate has no nesting for rule sets: a
//! `patterns` list can only point at repository entries by name. So the nested rules are
//! lifted out into a helper context of their own, and the push includes the helper by name.
//!
//! # The Algorithm
//!
//! 1. **Naming:**
//!    - Helper names are `<prefix><n>` with `n` counting up from 1 across the whole document
//!    - Names already taken by declared contexts are skipped
//!
//! 2. **Queueing:**
//!    - The emitter enqueues `(name, members)` and writes an include of `name` in place
//!
//! 3. **Draining:**
//!    - After each declared context the emitter pops helpers in FIFO order and emits each
//!      as a context; helpers enqueued meanwhile are popped in the same drain
//!
//! Names are deterministic, so compiling the same grammar twice gives the same document.

use iro_grammar::{GrammarSpec, RuleMember};
use std::collections::{HashSet, VecDeque};

/// A lifted rule set waiting to be emitted
#[derive(Debug, Clone, PartialEq)]
pub struct PendingHelper<'g> {
    pub name: String,
    pub members: &'g [RuleMember],
}

/// FIFO of helper contexts, plus the name counter for one document
#[derive(Debug)]
pub struct HelperQueue<'g> {
    prefix: String,
    counter: usize,
    reserved: HashSet<&'g str>,
    pending: VecDeque<PendingHelper<'g>>,
}

impl<'g> HelperQueue<'g> {
    pub fn new(prefix: impl Into<String>, grammar: &'g GrammarSpec) -> Self {
        HelperQueue {
            prefix: prefix.into(),
            counter: 0,
            reserved: grammar.contexts.iter().map(|c| c.name.as_str()).collect(),
            pending: VecDeque::new(),
        }
    }

    /// Queue a rule set and return the name it will be emitted under
    pub fn enqueue(&mut self, members: &'g [RuleMember]) -> String {
        let name = self.next_name();
        log::trace!("queued helper context '{}' ({} members)", name, members.len());
        self.pending.push_back(PendingHelper {
            name: name.clone(),
            members,
        });
        name
    }

    pub fn pop(&mut self) -> Option<PendingHelper<'g>> {
        self.pending.pop_front()
    }

    fn next_name(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("{}{}", self.prefix, self.counter);
            if !self.reserved.contains(name.as_str()) {
                return name;
            }
        }
    }
}
