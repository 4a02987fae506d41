//! Owns the pollers and search debouncer of whichever view is mounted.

use super::debounce::Debouncer;
use super::poll::{Completion, PollHandle, PollScheduler};
use super::sequence::{Seq, Sequencer};
use crate::api::{StockApi, StockQuery};
use crate::config::SyncConfig;
use crate::state::{Action, ListParams, MoverSide, PageResult, StockDetail};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Starts, restarts and tears down the fetch loops behind each view.
///
/// Every `mount_*`/`unmount_*` call cancels the affected pollers first and
/// then returns the sequence floor: the newest token issued so far. The
/// caller reduces that floor into the matching state slot before handling
/// any other action, so completions from the cancelled pollers are rejected.
pub struct SyncCoordinator {
    api: Arc<dyn StockApi>,
    scheduler: PollScheduler,
    sequencer: Sequencer,
    action_tx: mpsc::UnboundedSender<Action>,
    config: SyncConfig,
    list: Option<(ListParams, PollHandle)>,
    movers: Vec<PollHandle>,
    detail: Option<(String, PollHandle)>,
    debouncer: Debouncer,
    search_query: String,
}

impl SyncCoordinator {
    pub fn new(
        api: Arc<dyn StockApi>,
        config: SyncConfig,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let sequencer = Sequencer::new();
        Self {
            api,
            scheduler: PollScheduler::new(config.poll_interval(), sequencer.clone()),
            debouncer: Debouncer::new(config.search_debounce()),
            sequencer,
            action_tx,
            config,
            list: None,
            movers: Vec::new(),
            detail: None,
            search_query: String::new(),
        }
    }

    /// Parameters of the running list poller.
    pub fn list_params(&self) -> Option<&ListParams> {
        self.list.as_ref().map(|(params, _)| params)
    }

    /// Ticker of the running detail poller.
    pub fn detail_ticker(&self) -> Option<&str> {
        self.detail.as_ref().map(|(ticker, _)| ticker.as_str())
    }

    pub fn is_dashboard_mounted(&self) -> bool {
        self.list.is_some()
    }

    /// Query the debouncer was last given.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Tear down the detail poller and start the list and movers pollers.
    pub fn mount_dashboard(&mut self, params: ListParams) -> Seq {
        self.cancel_detail();
        self.cancel_dashboard();
        let floor = self.sequencer.current();

        tracing::info!(page = params.page, search = %params.search_term, "mounting dashboard");
        self.start_list(params);
        for side in [MoverSide::Buys, MoverSide::Sells] {
            let handle = self.start_movers(side);
            self.movers.push(handle);
        }
        floor
    }

    /// Restart only the list poller after a page or search term change.
    pub fn remount_list(&mut self, params: ListParams) -> Seq {
        if let Some((_, mut handle)) = self.list.take() {
            handle.cancel();
        }
        let floor = self.sequencer.current();

        tracing::debug!(page = params.page, search = %params.search_term, "remounting list");
        self.start_list(params);
        floor
    }

    /// Tear down the dashboard pollers and start polling `ticker`.
    pub fn mount_detail(&mut self, ticker: impl Into<String>) -> Seq {
        self.cancel_dashboard();
        self.cancel_detail();
        let floor = self.sequencer.current();

        let ticker = ticker.into();
        tracing::info!(%ticker, "mounting detail");
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let fetch_ticker = ticker.clone();
        let deliver_ticker = ticker.clone();

        let handle = self.scheduler.start(
            "detail",
            move || {
                let api = Arc::clone(&api);
                let ticker = fetch_ticker.clone();
                async move { api.fetch_stock(&ticker).await }
            },
            move |c: Completion<StockDetail>| {
                let _ = tx.send(Action::DetailLoaded {
                    ticker: deliver_ticker.clone(),
                    seq: c.seq,
                    mode: c.mode,
                    result: c.result.map_err(|e| e.to_string()),
                });
            },
        );
        self.detail = Some((ticker, handle));
        floor
    }

    /// Stop every poller. Safe to call more than once.
    pub fn unmount_all(&mut self) -> Seq {
        self.cancel_dashboard();
        self.cancel_detail();
        self.sequencer.current()
    }

    /// Feed the latest search box text to the debouncer.
    ///
    /// Queries below the minimum length cancel the pending lookup and never
    /// reach the network; for those the current floor is returned so the
    /// caller can reject lookups issued before the clear. Lookups already in
    /// flight run to completion; the store drops any whose query no longer
    /// matches the box.
    pub fn search_changed(&mut self, query: &str) -> Option<Seq> {
        if query == self.search_query {
            return None;
        }
        self.search_query = query.to_string();

        if query.chars().count() < self.config.min_query_len {
            self.debouncer.cancel();
            return Some(self.sequencer.current());
        }

        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let sequencer = self.sequencer.clone();
        let query = query.to_string();

        self.debouncer.call(async move {
            let seq = sequencer.next();
            tracing::debug!(%query, seq, "issuing search");
            let _ = tx.send(Action::SearchStarted {
                seq,
                query: query.clone(),
            });

            let result = api
                .fetch_stocks(&StockQuery::search(&query))
                .await
                .map(|page| page.results)
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::SearchResultsLoaded { seq, query, result });
        });
        None
    }

    /// Cancel all pollers and any pending search.
    pub fn shutdown(&mut self) {
        self.unmount_all();
        self.debouncer.cancel();
    }

    fn start_list(&mut self, params: ListParams) {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let query = StockQuery::list(&params, self.config.page_size);

        let handle = self.scheduler.start(
            "list",
            move || {
                let api = Arc::clone(&api);
                let query = query.clone();
                async move { api.fetch_stocks(&query).await }
            },
            move |c: Completion<PageResult>| {
                let _ = tx.send(Action::StocksLoaded {
                    seq: c.seq,
                    mode: c.mode,
                    result: c.result.map_err(|e| e.to_string()),
                });
            },
        );
        self.list = Some((params, handle));
    }

    fn start_movers(&self, side: MoverSide) -> PollHandle {
        let api = Arc::clone(&self.api);
        let tx = self.action_tx.clone();
        let query = StockQuery::movers(side, self.config.movers_count);
        let name = match side {
            MoverSide::Buys => "top-buys",
            MoverSide::Sells => "top-sells",
        };

        self.scheduler.start(
            name,
            move || {
                let api = Arc::clone(&api);
                let query = query.clone();
                async move { api.fetch_stocks(&query).await }
            },
            move |c: Completion<PageResult>| {
                let _ = tx.send(Action::MoversLoaded {
                    side,
                    seq: c.seq,
                    result: c.result.map(|page| page.results).map_err(|e| e.to_string()),
                });
            },
        )
    }

    fn cancel_dashboard(&mut self) {
        if let Some((_, mut handle)) = self.list.take() {
            handle.cancel();
        }
        for mut handle in self.movers.drain(..) {
            handle.cancel();
        }
    }

    fn cancel_detail(&mut self) {
        if let Some((_, mut handle)) = self.detail.take() {
            handle.cancel();
        }
    }
}

impl Drop for SyncCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
