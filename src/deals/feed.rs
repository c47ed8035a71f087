//! Screen-owned deal collections.
//!
//! A [`DealFeed`] holds an immutable, versioned [`Snapshot`]. Every change builds the next
//! collection from the current one and swaps it in, bumping the version. Readers holding an
//! older snapshot keep seeing exactly what they were given.
use super::ranker::{filter_deals, rank_deals, within_radius, DealFilter, SortKey};
use super::votes::{apply_vote, VoteDirection};
use super::{Deal, Votes};
use crate::community::prompt::{Denial, Prompt, PromptAction};
use crate::community::session::Session;
use crate::logutil::escape_log;
use log::{debug, info};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub version: u64,
    pub deals: Arc<Vec<Deal>>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Deal> {
        self.deals.iter().find(|d| d.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct DealFeed {
    name: String,
    current: Snapshot,
}

impl DealFeed {
    pub fn new(name: &str, deals: Vec<Deal>) -> Self {
        DealFeed {
            name: name.to_string(),
            current: Snapshot { version: 0, deals: Arc::new(deals) },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Deal> {
        self.current.get(id)
    }

    fn replace(&mut self, deals: Vec<Deal>) {
        self.current = Snapshot { version: self.current.version + 1, deals: Arc::new(deals) };
    }

    /// Count one vote on deal `id`.
    ///
    /// Denied sessions change nothing. `Ok(None)` means no deal has that id; the feed is
    /// left as it was.
    pub fn vote(
        &mut self,
        session: &Session,
        id: u64,
        direction: VoteDirection,
    ) -> Result<Option<Votes>, Denial> {
        session.gate_vote()?;
        if self.get(id).is_none() {
            debug!("{}: vote on missing deal {}", self.name, id);
            return Ok(None);
        }
        let mut tally = None;
        let next = self
            .current
            .deals
            .iter()
            .map(|d| {
                if d.id == id {
                    let voted = apply_vote(d, direction);
                    tally = Some(voted.votes);
                    voted
                } else {
                    d.clone()
                }
            })
            .collect();
        self.replace(next);
        if let Some(v) = tally {
            debug!(
                "{}: {} {}voted deal {} -> {}/{}",
                self.name,
                session.display_name(),
                direction,
                id,
                v.up,
                v.down
            );
        }
        Ok(tally)
    }

    /// Put a newly found deal at the top.
    pub fn prepend(&mut self, deal: Deal) {
        info!("{}: new deal \"{}\"", self.name, escape_log(&deal.title));
        let mut next = Vec::with_capacity(self.len() + 1);
        next.push(deal);
        next.extend(self.current.deals.iter().cloned());
        self.replace(next);
    }

    /// Prepend a deal found by pull-to-refresh and announce it.
    pub fn refresh(&mut self, found: Deal) -> Prompt {
        self.prepend(found);
        Prompt::new("🎉 New Deals Found!", "We found 1 new deal in your area!")
            .with_action(PromptAction::ok("Awesome!"))
    }

    /// Question asked before [`DealFeed::unsave`]. `None` when no deal has that id.
    pub fn confirm_remove(&self, id: u64) -> Option<Prompt> {
        self.get(id)?;
        Some(Prompt::confirm(
            "Remove from Saved",
            "Are you sure you want to remove this deal from your saved list?",
            "Remove",
        ))
    }

    /// Question asked before [`DealFeed::unsave_all`]. `None` when there is nothing to clear.
    pub fn confirm_clear(&self) -> Option<Prompt> {
        if self.is_empty() {
            return None;
        }
        Some(Prompt::confirm(
            "Clear All Saved Deals",
            "Are you sure you want to remove all saved deals? This action cannot be undone.",
            "Clear All",
        ))
    }

    /// Remove a confirmed deal from a saved list.
    pub fn unsave(&mut self, id: u64) -> Option<Prompt> {
        self.remove(id).then(|| {
            Prompt::new("Removed", "Deal removed from your saved list.")
                .with_action(PromptAction::ok("OK"))
        })
    }

    /// Empty a saved list after confirmation.
    pub fn unsave_all(&mut self) -> Option<Prompt> {
        (self.clear() > 0).then(|| {
            Prompt::new("Cleared", "All saved deals have been removed.")
                .with_action(PromptAction::ok("OK"))
        })
    }

    /// Drop deal `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        let next = self.current.deals.iter().filter(|d| d.id != id).cloned().collect();
        self.replace(next);
        info!("{}: removed deal {}", self.name, id);
        true
    }

    /// Remove everything. An already empty feed is left alone.
    pub fn clear(&mut self) -> usize {
        let n = self.len();
        if n > 0 {
            self.replace(Vec::new());
            info!("{}: cleared {} deals", self.name, n);
        }
        n
    }

    /// Filtered and ranked view of the current snapshot.
    pub fn view(&self, filter: &DealFilter, sort: SortKey) -> Vec<Deal> {
        if !filter.query.trim().is_empty() {
            debug!("{}: search \"{}\"", self.name, escape_log(&filter.query));
        }
        rank_deals(&filter_deals(&self.current.deals, filter), sort)
    }

    /// Deals within `radius_miles`, nearest first (pinned still lead).
    pub fn nearby(&self, radius_miles: f64) -> Vec<Deal> {
        rank_deals(&within_radius(&self.current.deals, radius_miles), SortKey::Distance)
    }
}
