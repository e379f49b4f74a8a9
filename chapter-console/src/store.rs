//! Opportunity store.
//!
//! The opportunities page and its drawer read the same list, so the list
//! lives here once and both subscribe to changes. Fetches are
//! last-write-wins: each one takes a ticket, and a completed fetch is dropped
//! if a newer ticket has already been applied.

use chapter_lib::model::Opportunity;
use chapter_lib::model::OpportunityStage;
use chapter_lib::model::Record;
use log::debug;
use log::warn;

/// Issued by [`OpportunityStore::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

type Listener = Box<dyn FnMut(&[Opportunity])>;

#[derive(Default)]
pub struct OpportunityStore {
    opportunities: Vec<Opportunity>,
    issued: u64,
    applied: u64,
    listeners: Vec<Listener>,
}

impl OpportunityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn get(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id.to_string() == id)
    }

    /// Table rows for the current list.
    pub fn records(&self) -> Vec<Record> {
        self.opportunities.iter().map(Opportunity::to_record).collect()
    }

    /// Registers a listener called after every applied change.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Opportunity]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Applies a fetch result unless a newer one already landed.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, opportunities: Vec<Opportunity>) -> bool {
        if ticket.0 <= self.applied {
            debug!("Dropping stale fetch {} (applied {})", ticket.0, self.applied);
            return false;
        }
        self.applied = ticket.0;
        self.opportunities = opportunities;
        self.notify();
        true
    }

    /// Changes an opportunity's stage, returning the previous one.
    pub fn update_stage(&mut self, id: &str, stage: OpportunityStage) -> Option<OpportunityStage> {
        let Some(opportunity) = self.opportunities.iter_mut().find(|o| o.id.to_string() == id) else {
            warn!("Stage change for unknown opportunity {id}");
            return None;
        };
        let previous = std::mem::replace(&mut opportunity.stage, stage);
        debug!("Opportunity {id}: {previous} -> {stage}");
        self.notify();
        Some(previous)
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.opportunities);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn opportunity(name: &str) -> Opportunity {
        Opportunity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            stage: OpportunityStage::Identified,
            created_at: Utc::now(),
            notes: None,
            company: None,
            contacts: vec![],
            job_posts: vec![],
        }
    }

    #[test]
    fn test_newer_fetch_wins() {
        let mut store = OpportunityStore::new();
        let first = store.begin_fetch();
        let second = store.begin_fetch();

        assert!(store.complete_fetch(second, vec![opportunity("new")]));
        assert!(!store.complete_fetch(first, vec![opportunity("old")]));
        assert_eq!(store.opportunities()[0].name, "new");
    }

    #[test]
    fn test_in_order_fetches_both_apply() {
        let mut store = OpportunityStore::new();
        let first = store.begin_fetch();
        assert!(store.complete_fetch(first, vec![opportunity("a")]));
        let second = store.begin_fetch();
        assert!(store.complete_fetch(second, vec![opportunity("b")]));
        assert_eq!(store.opportunities()[0].name, "b");
    }

    #[test]
    fn test_stage_update_notifies() {
        let calls = Rc::new(Cell::new(0));
        let mut store = OpportunityStore::new();
        let sink = calls.clone();
        store.subscribe(move |_| sink.set(sink.get() + 1));

        let ticket = store.begin_fetch();
        let item = opportunity("a");
        let id = item.id.to_string();
        store.complete_fetch(ticket, vec![item]);

        let previous = store.update_stage(&id, OpportunityStage::Qualified);
        assert_eq!(previous, Some(OpportunityStage::Identified));
        assert_eq!(store.get(&id).map(|o| o.stage), Some(OpportunityStage::Qualified));
        assert_eq!(store.records()[0].get("stage").and_then(|v| v.as_str()), Some("Qualified"));
        assert_eq!(calls.get(), 2);

        assert_eq!(store.update_stage("missing", OpportunityStage::Customer), None);
        assert_eq!(calls.get(), 2);
    }
}
