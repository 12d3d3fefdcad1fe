//! Vote aggregation
//!
//! Pure functions over an explicit vote collection: per-option tallies, the
//! best option across time slots and locations, and the participant × option
//! choice matrix shown on the results page.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Choice, Location, MeetingOption, Participant, TimeSlot, Vote, VoteTarget};

/// Yes/no/maybe counts for one option
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub no: usize,
    pub maybe: usize,
}

impl Tally {
    pub fn from_choices<I>(choices: I) -> Self
    where
        I: IntoIterator<Item = Choice>,
    {
        let mut tally = Tally::default();
        for choice in choices {
            tally.record(choice);
        }
        tally
    }

    pub fn record(&mut self, choice: Choice) {
        match choice {
            Choice::Yes => self.yes += 1,
            Choice::No => self.no += 1,
            Choice::Maybe => self.maybe += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.yes + self.no + self.maybe
    }
}

/// Tally the votes that reference `target`
pub fn tally_for(target: VoteTarget, votes: &[Vote]) -> Tally {
    Tally::from_choices(
        votes
            .iter()
            .filter(|vote| vote.target == target)
            .map(|vote| vote.choice),
    )
}

/// Tally every option at once in a single pass over the votes
pub fn tallies_by_target(votes: &[Vote]) -> HashMap<VoteTarget, Tally> {
    let mut tallies: HashMap<VoteTarget, Tally> = HashMap::new();
    for vote in votes {
        tallies.entry(vote.target).or_default().record(vote.choice);
    }
    tallies
}

/// The option with the most "yes" votes, together with its tally
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BestOption {
    pub option: MeetingOption,
    pub tally: Tally,
}

/// Pick the option with the highest yes-count.
///
/// Options are enumerated time slots first, then locations, each in listing
/// order. Only a strictly higher yes-count replaces the current best, so ties
/// go to the option enumerated first and, when nobody said yes, the first
/// option wins with a score of 0. With no options at all there is no best.
pub fn best_option(time_slots: &[TimeSlot], locations: &[Location], votes: &[Vote]) -> Option<BestOption> {
    let tallies = tallies_by_target(votes);
    let options = time_slots
        .iter()
        .cloned()
        .map(MeetingOption::TimeSlot)
        .chain(locations.iter().cloned().map(MeetingOption::Location));

    let mut best: Option<BestOption> = None;
    let mut best_score: i64 = -1;

    for option in options {
        let tally = tallies.get(&option.target()).copied().unwrap_or_default();
        let score = tally.yes as i64;
        if score > best_score {
            best_score = score;
            best = Some(BestOption { option, tally });
        }
    }

    best
}

/// One cell of the results matrix
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParticipantChoice {
    pub participant_id: Uuid,
    pub name: String,
    pub choice: Option<Choice>,
}

/// Lookup of each participant's choice per option
#[derive(Debug, Default)]
pub struct VoteIndex {
    choices: HashMap<(Uuid, VoteTarget), Choice>,
}

impl VoteIndex {
    pub fn new(votes: &[Vote]) -> Self {
        let choices = votes
            .iter()
            .map(|vote| ((vote.participant_id, vote.target), vote.choice))
            .collect();
        Self { choices }
    }

    pub fn choice_of(&self, participant_id: Uuid, target: VoteTarget) -> Option<Choice> {
        self.choices.get(&(participant_id, target)).copied()
    }
}

/// Every participant's choice for `target`, `None` where they did not vote
pub fn participant_matrix(participants: &[Participant], target: VoteTarget, index: &VoteIndex) -> Vec<ParticipantChoice> {
    participants
        .iter()
        .map(|participant| ParticipantChoice {
            participant_id: participant.id,
            name: participant.name.clone(),
            choice: index.choice_of(participant.id, target),
        })
        .collect()
}
