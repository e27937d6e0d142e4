//! Invoice posting strategy.
//!
//! A customer invoice debits the contact's receivable account for the gross
//! due amount and credits each line's income category net of inclusive VAT
//! and excise, with the backed-out levies posted to their own accounts. A
//! supplier invoice is the same journal with every side flipped, posting
//! input instead of output VAT. Line discounts are added back to the
//! category value and carried on a discount account of their own, so the
//! books show full list value and the concession separately.
//!
//! Reverse charge (purchase only) self-accounts the VAT: the input leg is
//! offset by an equal output credit and the payable shrinks by the VAT,
//! reflecting that the supplier never charged it.
//!
//! Sales lines that move tracked products carry an extra self-balancing
//! pair moving the unit cost from the stock asset to cost of goods sold.

use rust_decimal::Decimal;

use folio_shared::types::UserId;

use crate::document::kind::{Direction, DocumentKind};
use crate::document::status::DocumentStatus;
use crate::inventory::stock::{MovementFlow, posting_effects};
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::{JournalLine, Side};
use crate::money::exchange::to_functional;
use crate::money::vat::{inclusive_portion, on_net};

use super::error::PostingError;
use super::types::{ChartRoles, PostingPlan, TradeDocument, journal_description};

/// Derives the posting plan for an invoice.
///
/// # Errors
///
/// Fails when the stored exchange rate is unusable or the derived line set
/// does not satisfy the double-entry rules.
pub fn derive(
    doc: &TradeDocument,
    roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    let lines = trade_legs(doc, roles)?;
    let journal = Journal::balanced(
        PostingReference::new(ReferenceType::Invoice, doc.id),
        &doc.number,
        journal_description(DocumentKind::Invoice, &doc.number),
        doc.issue_date,
        doc.issue_date,
        user,
        lines,
    )?;

    Ok(PostingPlan {
        journal,
        new_status: DocumentStatus::Posted,
        stock_effects: posting_effects(
            MovementFlow::for_invoice(doc.direction),
            &doc.tracked_lines(),
        ),
        settlement: None,
    })
}

/// Builds the balanced leg set for a trading document.
///
/// Shared with the note strategies, which mirror every leg.
pub(super) fn trade_legs(
    doc: &TradeDocument,
    roles: &ChartRoles,
) -> Result<Vec<JournalLine>, PostingError> {
    if doc.exchange_rate <= Decimal::ZERO {
        return Err(PostingError::MissingReferenceData(format!(
            "usable exchange rate for document {}",
            doc.number
        )));
    }

    let rate = doc.exchange_rate;
    let date = doc.issue_date;
    let (party_side, category_side) = match doc.direction {
        Direction::Sales => (Side::Debit, Side::Credit),
        Direction::Purchase => (Side::Credit, Side::Debit),
    };

    let mut lines = Vec::new();
    let mut cost_legs = Vec::new();
    let mut gross_total = Decimal::ZERO;
    let mut vat_total = Decimal::ZERO;
    let mut excise_total = Decimal::ZERO;
    let mut discount_total = Decimal::ZERO;

    for line in &doc.lines {
        let base = to_functional(line.quantity * line.unit_price - line.discount, rate);
        let discount = to_functional(line.discount, rate);
        let excise = to_functional(line.excise_amount, rate);

        // Inclusive VAT is backed out of the discounted base; exclusive VAT
        // goes on top of it. Either way the levy is rounded exactly once.
        let (vat, line_gross) = if line.vat_inclusive {
            (inclusive_portion(base, line.vat_rate), base)
        } else {
            let vat = on_net(base, line.vat_rate);
            (vat, base + vat)
        };

        let mut category_value = base - excise + discount;
        if line.vat_inclusive {
            category_value -= vat;
        }
        if !category_value.is_zero() {
            lines.push(JournalLine::on_side(
                category_side,
                line.category_account_id,
                category_value,
                rate,
                date,
            ));
        }

        gross_total += line_gross;
        vat_total += vat;
        excise_total += excise;
        discount_total += discount;

        if doc.direction == Direction::Sales {
            if let Some(inv) = &line.inventory {
                let cost = to_functional(line.quantity * inv.unit_cost, rate);
                if !cost.is_zero() {
                    cost_legs.push(JournalLine::debit(
                        roles.cost_of_goods_sold,
                        cost,
                        rate,
                        date,
                    ));
                    cost_legs.push(JournalLine::credit(roles.inventory_asset, cost, rate, date));
                }
            }
        }
    }

    if !vat_total.is_zero() {
        let vat_account = match doc.direction {
            Direction::Sales => roles.output_vat,
            Direction::Purchase => roles.input_vat,
        };
        lines.push(JournalLine::on_side(
            category_side,
            vat_account,
            vat_total,
            rate,
            date,
        ));
    }
    if !excise_total.is_zero() {
        lines.push(JournalLine::on_side(
            category_side,
            roles.excise_duty,
            excise_total,
            rate,
            date,
        ));
    }
    if !discount_total.is_zero() {
        let discount_account = match doc.direction {
            Direction::Sales => roles.sales_discount,
            Direction::Purchase => roles.purchase_discount,
        };
        lines.push(JournalLine::on_side(
            party_side,
            discount_account,
            discount_total,
            rate,
            date,
        ));
    }

    let mut party_amount = gross_total;
    if doc.reverse_charge && doc.direction == Direction::Purchase && !vat_total.is_zero() {
        // The supplier never charged the VAT; the buyer self-accounts via
        // an output credit and owes the supplier the VAT-free amount.
        lines.push(JournalLine::on_side(
            party_side,
            roles.output_vat,
            vat_total,
            rate,
            date,
        ));
        party_amount -= vat_total;
    }
    if !party_amount.is_zero() {
        lines.push(JournalLine::on_side(
            party_side,
            doc.party_account_id,
            party_amount,
            rate,
            date,
        ));
    }

    lines.extend(cost_legs);
    Ok(lines)
}
