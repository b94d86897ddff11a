//! Integration tests driving the domain services through the adapter

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, InvoiceId, Money, TenantId};
use domain_ledger::{ChargeCategory, LedgerStore, StatementService};
use domain_tax::{ExemptionService, TaxError, TaxStore};
use infra_mem::InMemoryStore;

use test_utils::{
    canonical_invoice, init_test_tracing, TestChargeBuilder, TestExemptionBuilder,
    TestPaymentBuilder,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn myr(amount: Decimal) -> Money {
    Money::new(amount, Currency::MYR)
}

mod store_tests {
    use super::*;

    #[tokio::test]
    async fn test_charges_round_trip_in_posting_order() {
        init_test_tracing();
        let store = InMemoryStore::new();
        let tenant = TenantId::new();

        let (_, posted) = canonical_invoice(tenant);
        store.append_charges(&posted).await.unwrap();

        let read = store.charges_for_tenant(tenant).await.unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[0].id, posted[0].id);
        assert_eq!(read[1].id, posted[1].id);
    }

    #[tokio::test]
    async fn test_unknown_tenant_reads_empty() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();

        assert!(store.charges_for_tenant(tenant).await.unwrap().is_empty());
        assert!(store.payments_for_tenant(tenant).await.unwrap().is_empty());

        let profile = store.tax_profile(tenant).await.unwrap();
        assert!(profile.commencement_date.is_none());
        assert!(profile.exemptions.is_empty());
    }

    #[tokio::test]
    async fn test_tenants_are_isolated() {
        let store = InMemoryStore::new();
        let a = TenantId::new();
        let b = TenantId::new();

        store
            .append_charges(&[TestChargeBuilder::new()
                .with_tenant(a)
                .with_amount(myr(dec!(500)))
                .build()])
            .await
            .unwrap();
        store
            .record_payment(
                &TestPaymentBuilder::new()
                    .with_tenant(b)
                    .with_amount(myr(dec!(300)))
                    .received_on(d(2024, 1, 5))
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(store.charges_for_tenant(a).await.unwrap().len(), 1);
        assert!(store.charges_for_tenant(b).await.unwrap().is_empty());
        assert!(store.payments_for_tenant(a).await.unwrap().is_empty());
        assert_eq!(store.payments_for_tenant(b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_commencement_survives_exemption_insert() {
        let store = InMemoryStore::new();
        let tenant = TenantId::new();

        store.set_commencement(tenant, d(2023, 1, 1)).await;
        let exemption = TestExemptionBuilder::new().with_tenant(tenant).build();
        store.add_exemption(&exemption).await.unwrap();

        let profile = store.tax_profile(tenant).await.unwrap();
        assert_eq!(profile.commencement_date, Some(d(2023, 1, 1)));
        assert_eq!(profile.exemptions.len(), 1);
    }
}

mod statement_tests {
    use super::*;

    #[tokio::test]
    async fn test_statement_over_store() {
        init_test_tracing();
        let store = Arc::new(InMemoryStore::new());
        let tenant = TenantId::new();
        let invoice = InvoiceId::new();

        store
            .append_charges(&[
                TestChargeBuilder::new()
                    .with_tenant(tenant)
                    .with_invoice(invoice)
                    .with_amount(myr(dec!(1000)))
                    .issued(d(2024, 1, 1))
                    .due(d(2024, 1, 14))
                    .build(),
                TestChargeBuilder::new()
                    .with_tenant(tenant)
                    .with_invoice(invoice)
                    .with_category(ChargeCategory::LateFee)
                    .with_amount(myr(dec!(50)))
                    .on(d(2024, 2, 1))
                    .build(),
            ])
            .await
            .unwrap();
        store
            .record_payment(
                &TestPaymentBuilder::new()
                    .with_tenant(tenant)
                    .with_amount(myr(dec!(600)))
                    .received_on(d(2024, 2, 5))
                    .build(),
            )
            .await
            .unwrap();

        let statements = StatementService::new(store);
        let unsettled = statements.unsettled_charges(tenant).await.unwrap();

        // Late fee cleared first; 450 of rent remains
        assert_eq!(unsettled.len(), 1);
        assert_eq!(unsettled[0].charge.category, ChargeCategory::Rent);
        assert_eq!(unsettled[0].unsettled_amount.amount(), dec!(450));

        let summary = statements.aging(tenant, d(2024, 2, 20)).await.unwrap();
        // 37 days past the Jan 14 due date
        assert_eq!(summary.days_31_60.amount(), dec!(450));
        assert_eq!(summary.total.amount(), dec!(450));
    }
}

mod exemption_flow_tests {
    use super::*;

    /// Full retroactive flow: invoice billed and paid at the unexempted
    /// rate, exemption arrives later, the posted credit clears the
    /// difference without touching the original charges.
    #[tokio::test]
    async fn test_exemption_registration_credits_paid_invoice() {
        init_test_tracing();
        let store = Arc::new(InMemoryStore::new());
        let tenant = TenantId::new();

        store.set_commencement(tenant, d(2023, 1, 1)).await;
        let (invoice, posted) = canonical_invoice(tenant);
        store.append_charges(&posted).await.unwrap();
        store
            .record_payment(
                &TestPaymentBuilder::new()
                    .with_tenant(tenant)
                    .with_amount(myr(dec!(10800)))
                    .received_on(d(2024, 1, 10))
                    .for_invoice(invoice)
                    .build(),
            )
            .await
            .unwrap();

        let service = ExemptionService::new(Arc::clone(&store));
        let outcome = service
            .register_exemption(
                tenant,
                d(2024, 1, 10),
                d(2024, 1, 20),
                Some("Government SST exemption".into()),
            )
            .await
            .unwrap();

        assert_eq!(outcome.credit_notes.len(), 1);
        assert_eq!(outcome.total_credited.amount(), dec!(-283.87));

        // The credit landed as a new charge; the originals are untouched
        let charges = store.charges_for_tenant(tenant).await.unwrap();
        assert_eq!(charges.len(), 3);
        assert_eq!(charges[1].amount.amount(), dec!(800.00));
        assert_eq!(charges[2].category, ChargeCategory::Credit);
        assert_eq!(charges[2].amount.amount(), dec!(-283.87));
        assert_eq!(charges[2].invoice_id, invoice);

        // Fully paid before, so the credit leaves nothing outstanding
        let statements = StatementService::new(store);
        let unsettled = statements.unsettled_charges(tenant).await.unwrap();
        assert!(unsettled.is_empty());
    }

    #[tokio::test]
    async fn test_second_exemption_credits_only_the_increment() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = TenantId::new();

        store.set_commencement(tenant, d(2023, 1, 1)).await;
        let (_, posted) = canonical_invoice(tenant);
        store.append_charges(&posted).await.unwrap();

        let service = ExemptionService::new(Arc::clone(&store));
        let first = service
            .register_exemption(tenant, d(2024, 1, 10), d(2024, 1, 20), None)
            .await
            .unwrap();
        assert_eq!(first.total_credited.amount(), dec!(-283.87));

        let second = service
            .register_exemption(tenant, d(2024, 1, 21), d(2024, 1, 31), None)
            .await
            .unwrap();
        assert_eq!(second.credit_notes.len(), 1);
        assert_eq!(second.total_credited.amount(), dec!(-283.87));

        // Across both rounds exactly 567.74 was refunded: the original
        // 800.00 minus the 232.26 due on the nine remaining taxable days
        let charges = store.charges_for_tenant(tenant).await.unwrap();
        let credited: Decimal = charges
            .iter()
            .filter(|c| c.category == ChargeCategory::Credit)
            .map(|c| c.amount.amount())
            .sum();
        assert_eq!(credited, dec!(-567.74));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected_before_any_write() {
        let store = Arc::new(InMemoryStore::new());
        let tenant = TenantId::new();
        store.set_commencement(tenant, d(2023, 1, 1)).await;

        let service = ExemptionService::new(Arc::clone(&store));
        let result = service
            .register_exemption(tenant, d(2024, 2, 1), d(2024, 1, 1), None)
            .await;

        assert!(matches!(result, Err(TaxError::Temporal(_))));
        let profile = store.tax_profile(tenant).await.unwrap();
        assert!(profile.exemptions.is_empty());
    }

    #[tokio::test]
    async fn test_untaxed_tenant_recovers_wrongly_charged_tax() {
        // No commencement date means the correct tax is zero, so any
        // tax charged to this tenant was an error and comes back whole.
        let store = Arc::new(InMemoryStore::new());
        let tenant = TenantId::new();
        let (_, posted) = canonical_invoice(tenant);
        store.append_charges(&posted).await.unwrap();

        let service = ExemptionService::new(Arc::clone(&store));
        let outcome = service
            .register_exemption(tenant, d(2024, 1, 1), d(2024, 1, 31), None)
            .await
            .unwrap();

        assert_eq!(outcome.credit_notes.len(), 1);
        assert_eq!(outcome.total_credited.amount(), dec!(-800.00));
    }
}
