//! Database seeder for Folio development and testing.
//!
//! Seeds the built-in chart of accounts, a handful of demo accounts,
//! tracked products with opening stock, an imported bank transaction,
//! and sample draft documents ready to post.
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use folio_db::entities::sea_orm_active_enums::{AccountClass, PayMode, TradeDirection};
use folio_db::entities::{documents, inventories, products};
use folio_db::repositories::{
    AccountRepository, BankRepository, CreateAccountInput, CreateBankTransactionInput,
    CreateExpenseInput, CreateProductInput, CreateTradeInput, CreateTradeLineInput,
    DocumentRepository, InventoryRepository,
};

/// Seed user ID (consistent for all seeds)
const SEED_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = folio_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding chart of accounts...");
    seed_chart(&db).await;

    println!("Seeding demo accounts...");
    seed_demo_accounts(&db).await;

    println!("Seeding products and stock...");
    seed_products(&db).await;

    println!("Seeding bank transactions...");
    seed_bank_transactions(&db).await;

    println!("Seeding sample documents...");
    seed_documents(&db).await;

    println!("Seeding complete!");
}

fn seed_user_id() -> Uuid {
    Uuid::parse_str(SEED_USER_ID).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds the built-in control accounts the posting engine resolves by code.
async fn seed_chart(db: &DatabaseConnection) {
    let accounts = AccountRepository::new(db.clone());
    match accounts.ensure_built_in_chart().await {
        Ok(_) => println!("  Built-in chart in place"),
        Err(e) => eprintln!("Failed to seed built-in chart: {e}"),
    }
}

/// Seeds bank, party, and category accounts used by the sample documents.
async fn seed_demo_accounts(db: &DatabaseConnection) {
    let accounts = AccountRepository::new(db.clone());

    let demo = [
        ("1020", "Business Checking", AccountClass::Bank),
        ("1101", "Acme Ltd", AccountClass::Receivable),
        ("2101", "Globex Supplies", AccountClass::Payable),
        ("3100", "Opening Balance Equity", AccountClass::Equity),
        ("4000", "Sales Revenue", AccountClass::Income),
        ("5100", "Purchases", AccountClass::Expense),
        ("6100", "Office Supplies", AccountClass::Expense),
        ("6200", "Bank Charges", AccountClass::Expense),
    ];

    let mut created = 0;
    for (code, name, class) in demo {
        match accounts.find_by_code(code).await {
            Ok(Some(_)) => continue,
            Ok(None) => {}
            Err(e) => {
                eprintln!("Failed to look up account {code}: {e}");
                continue;
            }
        }

        let input = CreateAccountInput {
            code: code.to_string(),
            name: name.to_string(),
            class,
            is_active: true,
        };
        if let Err(e) = accounts.create(input).await {
            eprintln!("Failed to insert account {code}: {e}");
        } else {
            created += 1;
        }
    }

    println!("  Inserted {created} demo accounts");
}

/// Seeds tracked products with opening stock on hand.
async fn seed_products(db: &DatabaseConnection) {
    let inventory = InventoryRepository::new(db.clone());

    let catalogue = [
        ("Standing Desk", "DESK-001", "25"),
        ("Task Chair", "CHAIR-001", "40"),
        ("Monitor Arm", "ARM-001", "0"),
    ];

    let mut created = 0;
    for (name, sku, opening_stock) in catalogue {
        let existing = products::Entity::find()
            .filter(products::Column::Sku.eq(sku))
            .one(db)
            .await
            .ok()
            .flatten();
        if existing.is_some() {
            continue;
        }

        let product = match inventory
            .create_product(CreateProductInput {
                name: name.to_string(),
                sku: Some(sku.to_string()),
            })
            .await
        {
            Ok(product) => product,
            Err(e) => {
                eprintln!("Failed to insert product {sku}: {e}");
                continue;
            }
        };

        // Opening stock goes in directly; posted purchases maintain it
        // from here on.
        let stock = dec(opening_stock);
        if stock > Decimal::ZERO {
            let record = inventories::ActiveModel {
                id: Set(Uuid::now_v7()),
                product_id: Set(product.id),
                stock_on_hand: Set(stock),
                quantity_sold: Set(Decimal::ZERO),
                purchase_quantity: Set(stock),
                created_at: Set(Utc::now().into()),
                updated_at: Set(Utc::now().into()),
            };
            if let Err(e) = record.insert(db).await {
                eprintln!("Failed to insert inventory for {sku}: {e}");
            }
        }

        created += 1;
    }

    println!("  Inserted {created} products");
}

/// Seeds an unexplained bank statement line for reconciliation demos.
async fn seed_bank_transactions(db: &DatabaseConnection) {
    let accounts = AccountRepository::new(db.clone());
    let banks = BankRepository::new(db.clone());

    let Ok(Some(checking)) = accounts.find_by_code("1020").await else {
        eprintln!("Business Checking account missing, skipping bank transactions");
        return;
    };

    let existing = banks
        .list_unexplained(Some(checking.id))
        .await
        .unwrap_or_default();
    if !existing.is_empty() {
        println!("  Unexplained transactions already present, skipping...");
        return;
    }

    let statement = [
        (dec("1000.00"), false, "Customer payment - Acme Ltd"),
        (dec("45.50"), true, "Monthly account fee"),
    ];

    let mut created = 0;
    for (amount, withdrawal, description) in statement {
        let input = CreateBankTransactionInput {
            account_id: checking.id,
            transaction_date: Utc::now().date_naive(),
            amount,
            withdrawal,
            description: Some(description.to_string()),
        };
        if let Err(e) = banks.create(input).await {
            eprintln!("Failed to insert bank transaction: {e}");
        } else {
            created += 1;
        }
    }

    println!("  Inserted {created} bank transactions");
}

/// Seeds a draft sales invoice and a draft cash expense.
async fn seed_documents(db: &DatabaseConnection) {
    let accounts = AccountRepository::new(db.clone());
    let documents_repo = DocumentRepository::new(db.clone());
    let user_id = seed_user_id();

    let existing = documents::Entity::find()
        .filter(documents::Column::Number.eq("INV-0001"))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Sample documents already exist, skipping...");
        return;
    }

    let acme = accounts.find_by_code("1101").await.ok().flatten();
    let sales = accounts.find_by_code("4000").await.ok().flatten();
    let supplies = accounts.find_by_code("6100").await.ok().flatten();
    let (Some(acme), Some(sales), Some(supplies)) = (acme, sales, supplies) else {
        eprintln!("Demo accounts missing, skipping sample documents");
        return;
    };

    let desk = products::Entity::find()
        .filter(products::Column::Sku.eq("DESK-001"))
        .one(db)
        .await
        .ok()
        .flatten();

    // VAT-inclusive line so the derived journal carries the
    // 952.38 / 47.62 split of a 1000.00 gross at 5%.
    let invoice = CreateTradeInput {
        number: "INV-0001".to_string(),
        direction: TradeDirection::Sales,
        party_account_id: acme.id,
        issue_date: Utc::now().date_naive(),
        exchange_rate: Decimal::ONE,
        reverse_charge: false,
        notes: Some("Seeded sample invoice".to_string()),
        created_by: user_id,
        lines: vec![CreateTradeLineInput {
            category_account_id: sales.id,
            quantity: dec("2"),
            unit_price: dec("500.00"),
            discount: Decimal::ZERO,
            vat_rate: dec("5"),
            vat_inclusive: true,
            excise_amount: Decimal::ZERO,
            product_id: desk.map(|p| p.id),
            unit_cost: Some(dec("320.00")),
        }],
    };
    match documents_repo.create_invoice(invoice).await {
        Ok(_) => println!("  Created sample invoice INV-0001"),
        Err(e) => eprintln!("Failed to insert sample invoice: {e}"),
    }

    let expense = CreateExpenseInput {
        number: "EXP-0001".to_string(),
        date: Utc::now().date_naive(),
        exchange_rate: Decimal::ONE,
        amount: dec("120.00"),
        vat_rate: dec("20"),
        vat_inclusive: false,
        reverse_charge: false,
        category_account_id: supplies.id,
        pay_mode: PayMode::Cash,
        paid_from_account_id: None,
        payee_account_id: None,
        notes: Some("Seeded sample expense".to_string()),
        created_by: user_id,
    };
    match documents_repo.create_expense(expense).await {
        Ok(_) => println!("  Created sample expense EXP-0001"),
        Err(e) => eprintln!("Failed to insert sample expense: {e}"),
    }
}
