//! Dashboard state machine.
//!
//! One explicit container holds the selected location and the two AI request
//! states, so the mutual-exclusion and reset invariants live in one place
//! instead of being scattered across UI handlers. Commands dispatch into it,
//! the frontend only ever sees snapshots.

use serde::Serialize;

use crate::{data, derive_stats, GrowthStats, PopulationRecord, SprawlPrediction};

/// Lifecycle of one AI operation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum RequestState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

/// The two AI operations the dashboard can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Analysis,
    Prediction,
}

/// Serializable view of the dashboard, rebuilt after every command.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub location: String,
    pub records: Vec<PopulationRecord>,
    pub stats: Option<GrowthStats>,
    pub analysis: RequestState<String>,
    pub prediction: RequestState<SprawlPrediction>,
    pub busy: bool,
}

#[derive(Debug)]
pub struct Dashboard {
    location: String,
    /// Bumped on every location change; outcomes carrying an older token are
    /// stale and must be discarded.
    generation: u64,
    analysis: RequestState<String>,
    prediction: RequestState<SprawlPrediction>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            location: data::AGGREGATE_REGION.to_string(),
            generation: 0,
            analysis: RequestState::Idle,
            prediction: RequestState::Idle,
        }
    }
}

impl Dashboard {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn records(&self) -> &'static [PopulationRecord] {
        data::records_for(&self.location)
    }

    pub fn analysis(&self) -> &RequestState<String> {
        &self.analysis
    }

    pub fn prediction(&self) -> &RequestState<SprawlPrediction> {
        &self.prediction
    }

    /// True while either AI operation is in flight.
    pub fn busy(&self) -> bool {
        self.analysis.is_pending() || self.prediction.is_pending()
    }

    /// Switch the selected location. Unrecognized names collapse to the
    /// aggregate region. Both operations are reset unconditionally and the
    /// generation token is bumped so in-flight outcomes land nowhere.
    pub fn select_location(&mut self, location: &str) -> &str {
        let location = if data::is_known(location) {
            location
        } else {
            data::AGGREGATE_REGION
        };
        self.location = location.to_string();
        self.generation += 1;
        self.analysis = RequestState::Idle;
        self.prediction = RequestState::Idle;
        &self.location
    }

    /// Move an operation to Pending and hand out the current generation
    /// token. At most one operation may be in flight across both kinds;
    /// returns None (a no-op for the caller) while either is pending.
    pub fn try_begin(&mut self, op: Operation) -> Option<u64> {
        if self.busy() {
            return None;
        }
        match op {
            Operation::Analysis => self.analysis = RequestState::Pending,
            Operation::Prediction => self.prediction = RequestState::Pending,
        }
        Some(self.generation)
    }

    /// Commit an analysis outcome. Returns false when the token is stale and
    /// the outcome was discarded.
    pub fn finish_analysis(&mut self, token: u64, outcome: Result<String, String>) -> bool {
        if token != self.generation {
            return false;
        }
        self.analysis = match outcome {
            Ok(text) => RequestState::Succeeded(text),
            Err(message) => RequestState::Failed(message),
        };
        true
    }

    /// Commit a prediction outcome. Returns false when the token is stale and
    /// the outcome was discarded.
    pub fn finish_prediction(
        &mut self,
        token: u64,
        outcome: Result<SprawlPrediction, String>,
    ) -> bool {
        if token != self.generation {
            return false;
        }
        self.prediction = match outcome {
            Ok(prediction) => RequestState::Succeeded(prediction),
            Err(message) => RequestState::Failed(message),
        };
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        let records = self.records();
        Snapshot {
            location: self.location.clone(),
            records: records.to_vec(),
            stats: derive_stats(records),
            analysis: self.analysis.clone(),
            prediction: self.prediction.clone(),
            busy: self.busy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction_fixture() -> SprawlPrediction {
        SprawlPrediction {
            urban_area_growth: "15-20%".into(),
            population_density_change: "High Increase".into(),
            infrastructure_strain: "High".into(),
            summary: "Densification along transit corridors.".into(),
            factors_considered: vec!["Greenbelt legislation".into()],
            growth_hotspots: vec!["Vaughan Metropolitan Centre".into()],
        }
    }

    #[test]
    fn at_most_one_operation_in_flight() {
        let mut dash = Dashboard::default();
        let token = dash.try_begin(Operation::Analysis).unwrap();
        assert!(dash.try_begin(Operation::Prediction).is_none());
        assert!(dash.try_begin(Operation::Analysis).is_none());
        assert!(dash.finish_analysis(token, Ok("steady growth".into())));
        // Once settled, the other operation may start.
        assert!(dash.try_begin(Operation::Prediction).is_some());
    }

    #[test]
    fn success_and_failure_transitions() {
        let mut dash = Dashboard::default();
        let token = dash.try_begin(Operation::Prediction).unwrap();
        assert!(dash.prediction().is_pending());
        dash.finish_prediction(token, Ok(prediction_fixture()));
        assert!(matches!(dash.prediction(), RequestState::Succeeded(_)));

        let token = dash.try_begin(Operation::Analysis).unwrap();
        dash.finish_analysis(token, Err("Failed to get analysis. Please try again.".into()));
        assert_eq!(
            dash.analysis(),
            &RequestState::Failed("Failed to get analysis. Please try again.".into())
        );
    }

    #[test]
    fn location_change_resets_both_operations() {
        let mut dash = Dashboard::default();
        let token = dash.try_begin(Operation::Analysis).unwrap();
        dash.finish_analysis(token, Ok("summary".into()));
        let token = dash.try_begin(Operation::Prediction).unwrap();
        dash.finish_prediction(token, Err("Failed to get urban sprawl prediction. Please try again.".into()));

        dash.select_location("Toronto");
        assert_eq!(dash.location(), "Toronto");
        assert_eq!(dash.analysis(), &RequestState::Idle);
        assert_eq!(dash.prediction(), &RequestState::Idle);
        assert!(!dash.busy());
    }

    #[test]
    fn stale_outcome_is_discarded_after_location_change() {
        let mut dash = Dashboard::default();
        let token = dash.try_begin(Operation::Analysis).unwrap();
        dash.select_location("Markham");
        // The in-flight call resolves for the previous location.
        assert!(!dash.finish_analysis(token, Ok("stale text".into())));
        assert_eq!(dash.analysis(), &RequestState::Idle);

        // A fresh token for the current location still commits.
        let token = dash.try_begin(Operation::Analysis).unwrap();
        assert!(dash.finish_analysis(token, Ok("fresh text".into())));
        assert_eq!(dash.analysis(), &RequestState::Succeeded("fresh text".into()));
    }

    #[test]
    fn unknown_location_collapses_to_aggregate_region() {
        let mut dash = Dashboard::default();
        dash.select_location("Toronto");
        dash.select_location("Atlantis");
        assert_eq!(dash.location(), data::AGGREGATE_REGION);
    }

    #[test]
    fn snapshot_reflects_records_and_stats() {
        let mut dash = Dashboard::default();
        dash.select_location("Mississauga");
        let snapshot = dash.snapshot();
        assert_eq!(snapshot.location, "Mississauga");
        assert_eq!(snapshot.records.len(), 9);
        assert_eq!(snapshot.stats.unwrap().growth_percent, "62.2");
        assert!(!snapshot.busy);
    }
}
