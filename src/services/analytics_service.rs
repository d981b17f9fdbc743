// src/services/analytics_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AnalyticsRepository,
    models::{
        analytics::{AnalyticsSummary, LedgerTotals, LossView},
        auth::Actor,
    },
    services::policy::{authorize_in, Operation},
};

impl AnalyticsSummary {
    pub fn from_totals(totals: LedgerTotals) -> Self {
        let gross_profit = totals.revenue - totals.cogs;
        AnalyticsSummary {
            revenue: totals.revenue,
            cogs: totals.cogs,
            gross_profit,
            losses: totals.losses,
            net_profit: gross_profit - totals.losses,
        }
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    repo: AnalyticsRepository,
}

impl AnalyticsService {
    pub fn new(repo: AnalyticsRepository) -> Self {
        Self { repo }
    }

    pub async fn summary(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<AnalyticsSummary, AppError> {
        let org_id = authorize_in(actor, Operation::Analytics, requested_org)?;
        let totals = self.repo.ledger_totals(org_id).await?;
        Ok(AnalyticsSummary::from_totals(totals))
    }

    pub async fn loss_history(&self, actor: &Actor, requested_org: Option<Uuid>) -> Result<Vec<LossView>, AppError> {
        let org_id = authorize_in(actor, Operation::Analytics, requested_org)?;
        self.repo.list_losses(org_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn live_cogs_and_frozen_losses() {
        // One sale: qty 2, total 40, current cost 10. One loss: qty 1 at snapshot 8.
        let totals = LedgerTotals { revenue: dec!(40), cogs: dec!(2) * dec!(10), losses: dec!(1) * dec!(8) };
        let summary = AnalyticsSummary::from_totals(totals);

        assert_eq!(summary.revenue, dec!(40));
        assert_eq!(summary.cogs, dec!(20));
        assert_eq!(summary.losses, dec!(8));
        assert_eq!(summary.gross_profit, dec!(20));
        assert_eq!(summary.net_profit, dec!(12));
    }

    #[test]
    fn empty_ledgers_sum_to_zero() {
        let summary = AnalyticsSummary::from_totals(LedgerTotals::default());
        assert_eq!(summary.net_profit, Decimal::ZERO);
    }

    #[test]
    fn losses_can_push_net_profit_negative() {
        let totals = LedgerTotals { revenue: dec!(10), cogs: dec!(4), losses: dec!(9) };
        assert_eq!(AnalyticsSummary::from_totals(totals).net_profit, dec!(-3));
    }

    #[test]
    fn summary_serializes_in_camel_case() {
        let summary = AnalyticsSummary::from_totals(LedgerTotals::default());
        let json = serde_json::to_value(summary).unwrap();
        assert!(json.get("grossProfit").is_some());
        assert!(json.get("netProfit").is_some());
    }
}
