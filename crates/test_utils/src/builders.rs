//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else. `build()` panics on
//! invalid combinations, which is the desired behavior in tests.

use chrono::NaiveDate;
use core_kernel::{InvoiceId, Money, TenantId};
use domain_ledger::{Charge, ChargeCategory, Payment};
use domain_tax::ExemptionInterval;
use rust_decimal::Decimal;

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for constructing test charges
pub struct TestChargeBuilder {
    tenant_id: TenantId,
    invoice_id: InvoiceId,
    category: ChargeCategory,
    amount: Money,
    issue_date: NaiveDate,
    due_date: NaiveDate,
    description: Option<String>,
}

impl Default for TestChargeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestChargeBuilder {
    /// Creates a builder for the canonical rent charge
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new(),
            invoice_id: InvoiceId::new(),
            category: ChargeCategory::Rent,
            amount: MoneyFixtures::monthly_rent(),
            issue_date: TemporalFixtures::issue_date(),
            due_date: TemporalFixtures::due_date(),
            description: None,
        }
    }

    /// Sets the tenant
    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    /// Sets the invoice reference
    pub fn with_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = invoice_id;
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: ChargeCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the amount, keeping the builder's currency conventions
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets both issue and due date to the same day
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self.due_date = date;
        self
    }

    /// Sets the issue date
    pub fn issued(mut self, date: NaiveDate) -> Self {
        self.issue_date = date;
        self
    }

    /// Sets the due date
    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = date;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the charge, panicking on sign-convention violations
    pub fn build(self) -> Charge {
        let charge = Charge::new(
            self.tenant_id,
            self.invoice_id,
            self.category,
            self.amount,
            self.issue_date,
            self.due_date,
        )
        .expect("test charge should satisfy the sign convention");
        match self.description {
            Some(description) => charge.with_description(description),
            None => charge,
        }
    }
}

/// Builder for constructing test payments
pub struct TestPaymentBuilder {
    tenant_id: TenantId,
    amount: Money,
    date_received: NaiveDate,
    invoice_ref: Option<InvoiceId>,
    reference: Option<String>,
}

impl Default for TestPaymentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPaymentBuilder {
    /// Creates a builder for a payment of one month's rent
    pub fn new() -> Self {
        Self {
            tenant_id: TenantId::new(),
            amount: MoneyFixtures::monthly_rent(),
            date_received: TemporalFixtures::due_date(),
            invoice_ref: None,
            reference: Some(StringFixtures::payment_reference()),
        }
    }

    /// Sets the tenant
    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the received date
    pub fn received_on(mut self, date: NaiveDate) -> Self {
        self.date_received = date;
        self
    }

    /// Sets the informational invoice reference
    pub fn for_invoice(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_ref = Some(invoice_id);
        self
    }

    /// Builds the payment, panicking on negative amounts
    pub fn build(self) -> Payment {
        let mut payment = Payment::new(self.tenant_id, self.amount, self.date_received)
            .expect("test payment should be non-negative");
        payment.invoice_ref = self.invoice_ref;
        payment.reference = self.reference;
        payment
    }
}

/// Builder for constructing test exemptions
pub struct TestExemptionBuilder {
    tenant_id: TenantId,
    start: NaiveDate,
    end: NaiveDate,
    description: Option<String>,
    evidence_ref: Option<String>,
}

impl Default for TestExemptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestExemptionBuilder {
    /// Creates a builder for the canonical mid-January exemption
    pub fn new() -> Self {
        let period = TemporalFixtures::mid_january_exemption();
        Self {
            tenant_id: TenantId::new(),
            start: period.start,
            end: period.end,
            description: None,
            evidence_ref: Some(StringFixtures::exemption_letter()),
        }
    }

    /// Sets the tenant
    pub fn with_tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    /// Sets the exempt period
    pub fn spanning(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the exemption, panicking on inverted ranges
    pub fn build(self) -> ExemptionInterval {
        let mut exemption = ExemptionInterval::new(self.tenant_id, self.start, self.end)
            .expect("test exemption range should not be inverted");
        exemption.description = self.description;
        exemption.evidence_ref = self.evidence_ref;
        exemption
    }
}

/// Builds the canonical two-line invoice: rent plus full-rate SST
///
/// Returns the invoice id with its charges so tests can reference the
/// invoice in payments and reconciliation assertions.
pub fn canonical_invoice(tenant_id: TenantId) -> (InvoiceId, Vec<Charge>) {
    canonical_invoice_with_tax(tenant_id, MoneyFixtures::full_sst().amount())
}

/// Like [`canonical_invoice`] with an explicit tax amount
pub fn canonical_invoice_with_tax(
    tenant_id: TenantId,
    tax: Decimal,
) -> (InvoiceId, Vec<Charge>) {
    let invoice_id = InvoiceId::new();
    let rent = TestChargeBuilder::new()
        .with_tenant(tenant_id)
        .with_invoice(invoice_id)
        .build();
    let tax = TestChargeBuilder::new()
        .with_tenant(tenant_id)
        .with_invoice(invoice_id)
        .with_category(ChargeCategory::Tax)
        .with_amount(Money::new(tax, rent.amount.currency()))
        .build();
    (invoice_id, vec![rent, tax])
}
