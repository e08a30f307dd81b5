//! Demo-data provisioning. Accounts and their transaction histories are
//! created here and nowhere else; the API only ever reads them.

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use minibank::accounts::{Account, AccountType};
use minibank::auth::password::hash_secret;
use minibank::transactions::{new_reference, Transaction, TransactionKind, TransactionStatus};

struct SeedAccount {
    number: &'static str,
    pin: &'static str,
    holder: &'static str,
    active: bool,
    kind: AccountType,
    history: &'static [(TransactionKind, i64, &'static str)],
}

const SEED_ACCOUNTS: &[SeedAccount] = &[
    SeedAccount {
        number: "1234567890",
        pin: "1234",
        holder: "Demo User",
        active: true,
        kind: AccountType::Savings,
        history: &[
            (TransactionKind::Credit, 20_000_00, "Initial deposit"),
            (TransactionKind::Debit, -1_500_00, "ATM Withdrawal"),
            (TransactionKind::Debit, -2_000_00, "Grocery shopping"),
        ],
    },
    SeedAccount {
        number: "9876543210",
        pin: "4321",
        holder: "Dormant User",
        active: false,
        kind: AccountType::Current,
        history: &[(TransactionKind::Credit, 500_00, "Opening balance")],
    },
    SeedAccount {
        number: "1122334455",
        pin: "9999",
        holder: "Mike Johnson",
        active: true,
        kind: AccountType::Salary,
        history: &[
            (TransactionKind::Credit, 30_000_00, "Project payout"),
            (TransactionKind::Debit, -500_00, "Coffee shop"),
        ],
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "seed=info,minibank=info".into()),
        )
        .init();

    let database_url = std::env::var("DATABASE_URL")?;
    let db = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&db).await?;

    // Clean slate: users first (FK on accounts), then the ledger.
    sqlx::query("DELETE FROM users").execute(&db).await?;
    sqlx::query("DELETE FROM transactions").execute(&db).await?;
    sqlx::query("DELETE FROM accounts").execute(&db).await?;
    info!("cleared existing accounts, users and transactions");

    for seed in SEED_ACCOUNTS {
        let pin_hash = hash_secret(seed.pin)?;
        let ending_balance: i64 = seed.history.iter().map(|(_, amount, _)| amount).sum();

        let account = Account::create(
            &db,
            seed.number,
            &pin_hash,
            seed.holder,
            ending_balance,
            seed.active,
            seed.kind,
        )
        .await?;
        info!(
            account_number = %account.account_number,
            holder = %account.holder_name,
            active = account.is_active,
            "created account"
        );

        let mut running = 0i64;
        for (kind, amount, description) in seed.history {
            running += amount;
            let txn = Transaction::create(
                &db,
                seed.number,
                *kind,
                *amount,
                description,
                running,
                &new_reference(),
                TransactionStatus::Completed,
            )
            .await?;
            info!(reference = %txn.reference, amount_minor = txn.amount_minor, "posted transaction");
        }
    }

    info!("seeding complete");
    Ok(())
}
