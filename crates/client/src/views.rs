//! Render routines for the six sections and the stock-update submission.
//!
//! Every routine clears the display area, fetches its list, and renders it.
//! A failed fetch empties the list and leaves an error notification; it is
//! never propagated further.

use serde_json::json;

use stockdesk_api::{ApiError, UpdateStockRequest};
use stockdesk_core::PartId;

use crate::app::App;
use crate::form::{StockFormError, StockFormView, StockUpdateInput, validate};
use crate::screen::{Block, Notification};
use crate::section::Section;
use crate::session::TokenStore;
use crate::table::render_table;

/// Result of submitting the stock-update form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally; no request was made.
    Rejected(StockFormError),
    /// The backend call failed.
    Failed(ApiError),
    /// The backend accepted the update; `quantity` is what the cached stock
    /// list holds afterwards (re-fetched when the stock list was re-rendered).
    Applied { part: PartId, quantity: u64 },
}

impl<S: TokenStore> App<S> {
    pub async fn render_stock_list(&mut self) {
        self.begin(Section::StockList);
        self.fetch_stock().await;

        let rows = self
            .state
            .stock
            .iter()
            .map(|p| vec![json!(p.id), json!(p.name), json!(p.quantity)]);
        self.screen.push(Block::Table(render_table(
            &["Part ID", "Part Name", "Quantity"],
            rows,
        )));

        if self.state.stock.is_empty() {
            self.screen.paragraph("No items currently in stock.");
        }
    }

    pub async fn render_supply_plan(&mut self) {
        self.begin(Section::SupplyPlan);

        match self.client.list_supply_plan().await {
            Ok(items) => self.state.supply_plan = items,
            Err(err) => {
                self.state.supply_plan.clear();
                self.fetch_failed("Supply plan", err);
            }
        }

        let rows = self.state.supply_plan.iter().map(|t| {
            vec![
                json!(t.id),
                json!(t.name),
                json!(t.missing_quantity),
                json!(t.planned_delivery_date),
            ]
        });
        self.screen.push(Block::Table(render_table(
            &[
                "Part ID",
                "Part Name",
                "Missing Quantity",
                "Planned Delivery Date",
            ],
            rows,
        )));
        self.screen.notify(Notification::info(
            "Supply status of missing parts is tracked here.",
        ));
    }

    pub async fn render_logistics_plan(&mut self) {
        self.begin(Section::LogisticsPlan);

        match self.client.plan_logistics(None).await {
            Ok(plans) => self.state.logistics_plan = plans,
            Err(err) => {
                self.state.logistics_plan.clear();
                self.fetch_failed("Logistics plan", err);
            }
        }

        let rows = self
            .state
            .logistics_plan
            .iter()
            .map(|l| vec![json!(l.product_name), json!(l.quantity), json!(l.delivery_date)]);
        self.screen.push(Block::Table(render_table(
            &["Product", "Quantity", "Delivery Date"],
            rows,
        )));
    }

    pub async fn render_production_reports(&mut self) {
        self.begin(Section::ProductionReport);

        match self.client.list_production_reports().await {
            Ok(reports) => self.state.production_reports = reports,
            Err(err) => {
                self.state.production_reports.clear();
                self.fetch_failed("Production reports", err);
            }
        }

        let rows = self
            .state
            .production_reports
            .iter()
            .map(|r| vec![json!(r.product_name), json!(r.quantity), json!(r.delivery_date)]);
        self.screen.push(Block::Table(render_table(
            &["Product", "Quantity", "Delivery Date"],
            rows,
        )));
    }

    pub async fn render_stock_update(&mut self) {
        self.begin(Section::StockUpdate);
        self.fetch_stock().await;

        self.screen
            .push(Block::Form(StockFormView::build(&self.state.stock)));
    }

    pub async fn render_required_parts(&mut self) {
        self.begin(Section::RequiredParts);

        match self.client.list_required_parts().await {
            Ok(parts) => self.state.required_parts = parts,
            Err(err) => {
                self.state.required_parts.clear();
                self.fetch_failed("Required parts", err);
            }
        }

        if self.state.required_parts.is_empty() {
            self.screen
                .paragraph("No required-parts information is available.");
            return;
        }

        let rows = self.state.required_parts.iter().map(|p| {
            vec![
                json!(p.product_name),
                json!(p.part_id),
                json!(p.part_name),
                json!(p.required_quantity),
            ]
        });
        self.screen.push(Block::Table(render_table(
            &["Product", "Part ID", "Part Name", "Required Quantity"],
            rows,
        )));
        self.screen
            .paragraph("The parts above have been forwarded to production.");
    }

    /// Validate and send the stock-update form.
    ///
    /// On success the cached quantity is adjusted without re-fetching, and
    /// the stock list is re-rendered only when it is the active section. The
    /// confirmation is shown after that re-render so it is not cleared.
    pub async fn submit_stock_update(&mut self, input: StockUpdateInput) -> SubmitOutcome {
        let update = match validate(&input, &self.state.stock) {
            Ok(update) => update,
            Err(err) => {
                tracing::info!(%err, "stock update rejected");
                self.form_notice(Notification::error(err.to_string()));
                return SubmitOutcome::Rejected(err);
            }
        };

        let req = UpdateStockRequest::new(update.part.clone(), update.movement, update.quantity);
        tracing::info!(
            part = %update.part,
            movement = %update.movement,
            quantity = update.quantity,
            "submitting stock update"
        );

        let resp = match self.client.update_stock(&req).await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(error = %err, "stock update failed");
                self.form_notice(Notification::error(err.to_string()));
                self.handle_auth_failure(&err);
                return SubmitOutcome::Failed(err);
            }
        };

        if let Some(item) = self.state.part_mut(&update.part) {
            match update.movement.apply(item.quantity, update.quantity) {
                Ok(q) => item.quantity = q,
                Err(err) => tracing::warn!(%err, "cached quantity left unchanged"),
            }
            if let Some(form) = self.screen.form_mut() {
                form.refresh_part(item);
            }
        }

        // the re-render fetches, so the backend's quantity replaces ours
        if self.state.is_active(Section::StockList) {
            self.render_stock_list().await;
        }

        self.form_notice(Notification::info(
            resp.message
                .unwrap_or_else(|| "Stock updated successfully.".to_string()),
        ));

        let quantity = self
            .state
            .part(&update.part)
            .map_or(0, |item| item.quantity);
        SubmitOutcome::Applied {
            part: update.part,
            quantity,
        }
    }

    /// Clear the display area and title it. Does not change navigation.
    fn begin(&mut self, section: Section) {
        self.screen.clear();
        self.screen.title(section.title());
    }

    async fn fetch_stock(&mut self) {
        match self.client.list_products().await {
            Ok(items) => {
                tracing::info!(count = items.len(), "stock fetched");
                self.state.stock = items;
            }
            Err(err) => {
                self.state.stock.clear();
                self.fetch_failed("Stock information", err);
            }
        }
    }

    pub(crate) fn fetch_failed(&mut self, what: &str, err: ApiError) {
        tracing::warn!(what, error = %err, "fetch failed");
        self.screen.notify(Notification::error(format!(
            "{what} could not be loaded: {err}"
        )));
        self.handle_auth_failure(&err);
    }

    /// Put `notice` in the form's notice area, or on the screen when no form
    /// is displayed.
    fn form_notice(&mut self, notice: Notification) {
        match self.screen.form_mut() {
            Some(form) => form.notice = Some(notice),
            None => self.screen.notify(notice),
        }
    }
}

