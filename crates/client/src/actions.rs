//! One-shot backend operations outside the six sections.
//!
//! Each action replaces the display area with its title and either the
//! backend's answer or an error notification. None of them is a section, so
//! the active section is cleared.

use serde_json::{Value, json};

use stockdesk_api::{
    ApiError, ApiResult, CheckPartStatusRequest, DeliverToProductionRequest, PlanLogisticsRequest,
    ProcureMissingPartsRequest,
};

use crate::app::App;
use crate::screen::{Block, Notification};
use crate::session::TokenStore;
use crate::table::render_table;

impl<S: TokenStore> App<S> {
    pub async fn check_part_status(&mut self, req: &CheckPartStatusRequest) -> ApiResult<Value> {
        self.begin_action("Part Status");
        let res = self.client.check_part_status(req).await;
        self.show_json("Part status", res)
    }

    pub async fn procure_missing_parts(
        &mut self,
        req: &ProcureMissingPartsRequest,
    ) -> ApiResult<Value> {
        self.begin_action("Procurement");
        let res = self.client.procure_missing_parts(req).await;
        self.show_json("Procurement", res)
    }

    pub async fn upcoming_products_report(&mut self) -> ApiResult<Value> {
        self.begin_action("Upcoming Products");
        let res = self.client.upcoming_products_report().await;
        self.show_json("Upcoming products report", res)
    }

    pub async fn deliver_to_production(
        &mut self,
        req: &DeliverToProductionRequest,
    ) -> ApiResult<Value> {
        self.begin_action("Delivery to Production");
        let res = self.client.deliver_to_production(req).await;
        self.show_json("Delivery to production", res)
    }

    /// Submit a logistics plan and show the plan the backend returns.
    ///
    /// The returned plan replaces the cached one.
    pub async fn plan_logistics(&mut self, req: &PlanLogisticsRequest) -> ApiResult<usize> {
        self.begin_action("Logistics Planning");
        tracing::info!(
            product = %req.product_id,
            quantity = req.quantity,
            delivery_date = %req.delivery_date,
            "planning logistics"
        );

        match self.client.plan_logistics(Some(req)).await {
            Ok(plans) => {
                self.state.logistics_plan = plans;
                let rows = self.state.logistics_plan.iter().map(|l| {
                    vec![json!(l.product_name), json!(l.quantity), json!(l.delivery_date)]
                });
                self.screen.push(Block::Table(render_table(
                    &["Product", "Quantity", "Delivery Date"],
                    rows,
                )));
                Ok(self.state.logistics_plan.len())
            }
            Err(err) => {
                self.action_failed("Logistics planning", &err);
                Err(err)
            }
        }
    }

    fn begin_action(&mut self, title: &str) {
        self.state.active = None;
        self.screen.clear();
        self.screen.title(title);
    }

    fn show_json(&mut self, what: &str, res: ApiResult<Value>) -> ApiResult<Value> {
        match &res {
            Ok(value) => self.screen.push(Block::Json(value.clone())),
            Err(err) => self.action_failed(what, err),
        }
        res
    }

    fn action_failed(&mut self, what: &str, err: &ApiError) {
        tracing::warn!(what, error = %err, "action failed");
        self.screen
            .notify(Notification::error(format!("{what} failed: {err}")));
        self.handle_auth_failure(err);
    }
}
