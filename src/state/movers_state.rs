//! Top buys and top sells panels.

use super::phase::ApplyOutcome;
use super::stock::StockSummary;
use crate::sync::{Seq, SequenceGate};

/// Which end of the health ranking a movers panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoverSide {
    /// Highest health scores.
    Buys,
    /// Lowest health scores.
    Sells,
}

impl MoverSide {
    pub fn title(self) -> &'static str {
        match self {
            Self::Buys => "Top Buyers",
            Self::Sells => "Top Sellers",
        }
    }
}

/// Movers are refreshed silently; they never gate loading or raise errors.
#[derive(Debug, Default)]
pub struct MoversState {
    pub top_buys: Vec<StockSummary>,
    pub top_sells: Vec<StockSummary>,
    mounted: bool,
    buys_gate: SequenceGate,
    sells_gate: SequenceGate,
}

impl MoversState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, floor: Seq) {
        self.mounted = true;
        self.buys_gate.raise_floor(floor);
        self.sells_gate.raise_floor(floor);
    }

    pub fn unmount(&mut self, floor: Seq) {
        self.mounted = false;
        self.buys_gate.raise_floor(floor);
        self.sells_gate.raise_floor(floor);
    }

    pub fn side(&self, side: MoverSide) -> &[StockSummary] {
        match side {
            MoverSide::Buys => &self.top_buys,
            MoverSide::Sells => &self.top_sells,
        }
    }

    pub fn apply(
        &mut self,
        side: MoverSide,
        seq: Seq,
        result: Result<Vec<StockSummary>, String>,
    ) -> ApplyOutcome {
        if !self.mounted {
            return ApplyOutcome::Stale;
        }
        let (gate, slot) = match side {
            MoverSide::Buys => (&mut self.buys_gate, &mut self.top_buys),
            MoverSide::Sells => (&mut self.sells_gate, &mut self.top_sells),
        };

        match result {
            Ok(stocks) if gate.admit(seq) => {
                *slot = stocks;
                ApplyOutcome::Applied
            }
            Ok(_) => ApplyOutcome::Stale,
            Err(e) if gate.belongs(seq) => ApplyOutcome::Swallowed(e),
            Err(_) => ApplyOutcome::Stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::stock::HealthBadge;

    fn stock(ticker: &str, score: u8) -> StockSummary {
        StockSummary {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            sector: None,
            logo_url: None,
            current_price: None,
            health_score: score,
            health_badge: HealthBadge::Hold,
            sparkline: Vec::new(),
        }
    }

    #[test]
    fn test_sides_update_independently() {
        let mut movers = MoversState::new();
        movers.mount(0);

        movers.apply(MoverSide::Buys, 1, Ok(vec![stock("TCS", 90)]));
        movers.apply(MoverSide::Sells, 2, Ok(vec![stock("YESBANK", 10)]));
        let outcome = movers.apply(MoverSide::Buys, 3, Err("timeout".to_string()));

        assert!(matches!(outcome, ApplyOutcome::Swallowed(_)));
        assert_eq!(movers.side(MoverSide::Buys)[0].ticker, "TCS");
        assert_eq!(movers.side(MoverSide::Sells)[0].ticker, "YESBANK");
    }

    #[test]
    fn test_unmounted_movers_ignore_completions() {
        let mut movers = MoversState::new();
        movers.mount(0);
        movers.unmount(4);

        let outcome = movers.apply(MoverSide::Buys, 3, Ok(vec![stock("TCS", 90)]));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(movers.top_buys.is_empty());
    }
}
