//! Expense posting strategy.
//!
//! The category leg is debited net of inclusive VAT (or for the recorded
//! amount when VAT is exclusive), any VAT goes to input VAT, and the credit
//! side settles against the paying account: the bank's account, petty cash,
//! or the payee's payable account when unpaid. The credited amount follows
//! from the VAT mode: exclusive VAT is paid on top of the recorded amount,
//! and a reverse-charge supplier never charges the VAT at all.
//!
//! Bank- and cash-paid expenses also produce a settlement instruction; the
//! repository layer materializes it as a bank transaction, explanation, and
//! link row in the same unit of work.

use rust_decimal::Decimal;

use folio_shared::types::UserId;

use crate::document::kind::DocumentKind;
use crate::document::status::DocumentStatus;
use crate::ledger::journal::{Journal, PostingReference, ReferenceType};
use crate::ledger::line::JournalLine;
use crate::money::exchange::to_functional;
use crate::money::vat::{inclusive_portion, on_net};

use super::error::PostingError;
use super::types::{
    ChartRoles, ExpenseDocument, ExpensePayment, PostingPlan, SettlementInstruction,
    journal_description,
};

/// Derives the posting plan for an expense.
///
/// # Errors
///
/// Fails when the stored exchange rate is unusable or the derived line set
/// does not satisfy the double-entry rules.
pub fn derive(
    doc: &ExpenseDocument,
    roles: &ChartRoles,
    user: UserId,
) -> Result<PostingPlan, PostingError> {
    if doc.exchange_rate <= Decimal::ZERO {
        return Err(PostingError::MissingReferenceData(format!(
            "usable exchange rate for expense {}",
            doc.number
        )));
    }

    let rate = doc.exchange_rate;
    let date = doc.date;
    let amount = to_functional(doc.amount, rate);
    let vat = if doc.vat_inclusive {
        inclusive_portion(amount, doc.vat_rate)
    } else {
        on_net(amount, doc.vat_rate)
    };

    let category_value = if doc.vat_inclusive { amount - vat } else { amount };
    let paid = match (doc.reverse_charge, doc.vat_inclusive) {
        (false, false) => amount + vat,
        (true, true) => amount - vat,
        _ => amount,
    };

    let settlement_account = match doc.payment {
        ExpensePayment::Bank { account_id } => account_id,
        ExpensePayment::Cash => roles.petty_cash,
        ExpensePayment::Credit { payee_account_id } => payee_account_id,
    };

    let mut lines = Vec::new();
    if !category_value.is_zero() {
        lines.push(JournalLine::debit(doc.category_account_id, category_value, rate, date));
    }
    if !vat.is_zero() {
        lines.push(JournalLine::debit(roles.input_vat, vat, rate, date));
        if doc.reverse_charge {
            lines.push(JournalLine::credit(roles.output_vat, vat, rate, date));
        }
    }
    if !paid.is_zero() {
        lines.push(JournalLine::credit(settlement_account, paid, rate, date));
    }

    let journal = Journal::balanced(
        PostingReference::new(ReferenceType::Expense, doc.id),
        &doc.number,
        journal_description(DocumentKind::Expense, &doc.number),
        date,
        date,
        user,
        lines,
    )?;

    let settlement = match doc.payment {
        ExpensePayment::Bank { .. } | ExpensePayment::Cash => Some(SettlementInstruction {
            account_id: settlement_account,
            amount: paid,
            date,
            memo: journal_description(DocumentKind::Expense, &doc.number),
        }),
        ExpensePayment::Credit { .. } => None,
    };

    Ok(PostingPlan {
        journal,
        new_status: DocumentStatus::Posted,
        stock_effects: Vec::new(),
        settlement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_shared::types::{AccountId, DocumentId};
    use rust_decimal_macros::dec;

    use crate::ledger::line::Side;

    fn roles() -> ChartRoles {
        ChartRoles {
            accounts_receivable: AccountId::new(),
            accounts_payable: AccountId::new(),
            output_vat: AccountId::new(),
            input_vat: AccountId::new(),
            excise_duty: AccountId::new(),
            sales_discount: AccountId::new(),
            purchase_discount: AccountId::new(),
            inventory_asset: AccountId::new(),
            cost_of_goods_sold: AccountId::new(),
            petty_cash: AccountId::new(),
            vat_payable: AccountId::new(),
        }
    }

    fn doc(amount: Decimal, vat_rate: Decimal, vat_inclusive: bool) -> ExpenseDocument {
        ExpenseDocument {
            id: DocumentId::new(),
            number: "EXP-014".into(),
            status: DocumentStatus::Draft,
            date: NaiveDate::from_ymd_opt(2026, 4, 18).unwrap(),
            exchange_rate: Decimal::ONE,
            amount,
            vat_rate,
            vat_inclusive,
            reverse_charge: false,
            category_account_id: AccountId::new(),
            payment: ExpensePayment::Bank {
                account_id: AccountId::new(),
            },
        }
    }

    fn amount_on(journal: &Journal, account: AccountId, side: Side) -> Decimal {
        journal
            .lines()
            .iter()
            .filter(|l| l.account_id == account && l.side == side)
            .map(|l| l.amount)
            .sum()
    }

    #[test]
    fn exclusive_vat_is_paid_on_top() {
        let roles = roles();
        let doc = doc(dec!(100.00), dec!(5), false);
        let ExpensePayment::Bank { account_id: bank } = doc.payment else {
            unreachable!()
        };

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(
            amount_on(&plan.journal, doc.category_account_id, Side::Debit),
            dec!(100.00)
        );
        assert_eq!(amount_on(&plan.journal, roles.input_vat, Side::Debit), dec!(5.00));
        assert_eq!(amount_on(&plan.journal, bank, Side::Credit), dec!(105.00));
        assert!(plan.journal.totals().is_balanced());

        let settlement = plan.settlement.unwrap();
        assert_eq!(settlement.account_id, bank);
        assert_eq!(settlement.amount, dec!(105.00));
    }

    #[test]
    fn inclusive_vat_is_backed_out_of_the_paid_amount() {
        let roles = roles();
        let doc = doc(dec!(105.00), dec!(5), true);

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(
            amount_on(&plan.journal, doc.category_account_id, Side::Debit),
            dec!(100.00)
        );
        assert_eq!(amount_on(&plan.journal, roles.input_vat, Side::Debit), dec!(5.00));
        assert_eq!(plan.journal.totals().debits, dec!(105.00));
    }

    #[test]
    fn reverse_charge_inclusive_nets_out_the_vat() {
        // 200.00 recorded inclusive at 5%: VAT 9.52 appears on both VAT
        // accounts and the supplier is paid 190.48.
        let roles = roles();
        let mut doc = doc(dec!(200.00), dec!(5), true);
        doc.reverse_charge = true;
        let ExpensePayment::Bank { account_id: bank } = doc.payment else {
            unreachable!()
        };

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(amount_on(&plan.journal, roles.input_vat, Side::Debit), dec!(9.52));
        assert_eq!(
            amount_on(&plan.journal, roles.output_vat, Side::Credit),
            dec!(9.52)
        );
        assert_eq!(
            amount_on(&plan.journal, doc.category_account_id, Side::Debit),
            dec!(190.48)
        );
        assert_eq!(amount_on(&plan.journal, bank, Side::Credit), dec!(190.48));
        assert!(plan.journal.totals().is_balanced());
    }

    #[test]
    fn reverse_charge_exclusive_pays_the_recorded_amount() {
        let roles = roles();
        let mut doc = doc(dec!(200.00), dec!(5), false);
        doc.reverse_charge = true;

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(amount_on(&plan.journal, roles.input_vat, Side::Debit), dec!(10.00));
        assert_eq!(
            amount_on(&plan.journal, roles.output_vat, Side::Credit),
            dec!(10.00)
        );
        assert_eq!(plan.journal.totals().debits, dec!(210.00));
        assert!(plan.journal.totals().is_balanced());
    }

    #[test]
    fn cash_expenses_settle_against_petty_cash() {
        let roles = roles();
        let mut doc = doc(dec!(40.00), dec!(0), false);
        doc.payment = ExpensePayment::Cash;

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(
            amount_on(&plan.journal, roles.petty_cash, Side::Credit),
            dec!(40.00)
        );
        assert_eq!(plan.settlement.unwrap().account_id, roles.petty_cash);
    }

    #[test]
    fn unpaid_expenses_credit_the_payee_and_skip_settlement() {
        let roles = roles();
        let payee = AccountId::new();
        let mut doc = doc(dec!(75.00), dec!(0), false);
        doc.payment = ExpensePayment::Credit {
            payee_account_id: payee,
        };

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        assert_eq!(amount_on(&plan.journal, payee, Side::Credit), dec!(75.00));
        assert!(plan.settlement.is_none());
    }

    #[test]
    fn foreign_currency_expense_converts_once() {
        let roles = roles();
        let mut doc = doc(dec!(100.00), dec!(5), false);
        doc.exchange_rate = dec!(3.6725);

        let plan = derive(&doc, &roles, folio_shared::types::UserId::new()).unwrap();

        // 367.25 net, VAT 18.36, paid 385.61.
        assert_eq!(
            amount_on(&plan.journal, doc.category_account_id, Side::Debit),
            dec!(367.25)
        );
        assert_eq!(amount_on(&plan.journal, roles.input_vat, Side::Debit), dec!(18.36));
        assert_eq!(plan.journal.totals().credits, dec!(385.61));
    }
}
