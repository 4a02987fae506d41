//! Query parameters for the stock list endpoint.

use crate::state::{ListParams, MoverSide};

/// Sort order accepted by the list endpoint's `ordering` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    HealthScore,
    HealthScoreDesc,
    Ticker,
    TickerDesc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HealthScore => "health_score",
            Self::HealthScoreDesc => "-health_score",
            Self::Ticker => "ticker",
            Self::TickerDesc => "-ticker",
        }
    }
}

/// A request against `/api/stocks/`. Unset fields are left off the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub ordering: Option<SortOrder>,
    pub page_size: Option<usize>,
}

impl StockQuery {
    /// One page of the dashboard list.
    pub fn list(params: &ListParams, page_size: usize) -> Self {
        let search = params.search_term.trim();
        Self {
            page: Some(params.page),
            search: (!search.is_empty()).then(|| search.to_string()),
            ordering: None,
            page_size: Some(page_size),
        }
    }

    /// A quick search lookup.
    pub fn search(query: &str) -> Self {
        Self {
            search: Some(query.to_string()),
            ..Self::default()
        }
    }

    /// The healthiest or least healthy `count` stocks.
    pub fn movers(side: MoverSide, count: usize) -> Self {
        let ordering = match side {
            MoverSide::Buys => SortOrder::HealthScoreDesc,
            MoverSide::Sells => SortOrder::HealthScore,
        };
        Self {
            ordering: Some(ordering),
            page_size: Some(count),
            ..Self::default()
        }
    }

    /// Query string pairs in a stable order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_str().to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_query_omits_empty_search() {
        let params = ListParams {
            page: 3,
            search_term: "  ".to_string(),
        };
        assert_eq!(
            StockQuery::list(&params, 20).to_pairs(),
            vec![("page", "3".to_string()), ("page_size", "20".to_string())]
        );
    }

    #[test]
    fn test_list_query_with_search() {
        let params = ListParams {
            page: 1,
            search_term: "REL".to_string(),
        };
        assert_eq!(
            StockQuery::list(&params, 20).to_pairs(),
            vec![
                ("page", "1".to_string()),
                ("search", "REL".to_string()),
                ("page_size", "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_movers_queries() {
        assert_eq!(
            StockQuery::movers(MoverSide::Buys, 4).to_pairs(),
            vec![
                ("ordering", "-health_score".to_string()),
                ("page_size", "4".to_string()),
            ]
        );
        assert_eq!(
            StockQuery::movers(MoverSide::Sells, 4).ordering,
            Some(SortOrder::HealthScore)
        );
    }

    #[test]
    fn test_search_query_only_sets_search() {
        assert_eq!(
            StockQuery::search("TC").to_pairs(),
            vec![("search", "TC".to_string())]
        );
    }
}
