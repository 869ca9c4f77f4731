use std::str::FromStr;

use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::env;

use wedding_planner::database::guest_repo::{self, NewGuest};
use wedding_planner::database::schema;

struct ParsedGuest<'a> {
    name: &'a str,
    family_id: Option<&'a str>,
    email: Option<&'a str>,
    mobile: Option<&'a str>,
    address: Option<&'a str>,
}

fn optional(cell: Option<&str>) -> Option<&str> {
    cell.filter(|s| !s.is_empty())
}

/// Split one `name,family_id,email,mobile,address` line; empty cells become
/// None. Lines without a name are skipped.
fn parse_guest_line(line: &str) -> Option<ParsedGuest<'_>> {
    let mut cells = line.splitn(5, ',').map(str::trim);
    let name = cells.next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some(ParsedGuest {
        name,
        family_id: optional(cells.next()),
        email: optional(cells.next()),
        mobile: optional(cells.next()),
        address: optional(cells.next()),
    })
}

/// One-off bulk loader for the guest list. Expects a headerless CSV with
/// lines of `name,family_id,email,mobile,address`; empty cells become NULL.
/// Guests start at attending = maybe. Commas inside fields are not supported.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let csv_path = env::args()
        .nth(1)
        .or_else(|| env::var("GUEST_CSV").ok())
        .expect("usage: import_guests <guests.csv>");

    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://wedding.db".to_string());
    let connect_options = SqliteConnectOptions::from_str(&db_url)
        .expect("DATABASE_URL is not a valid sqlite URL")
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .expect("Cannot connect to the database");
    schema::init(&pool).await.expect("Cannot initialize schema");

    let contents = std::fs::read_to_string(&csv_path).expect("Cannot read guest CSV");

    let mut imported = 0u32;
    let mut skipped = 0u32;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(guest) = parse_guest_line(line) else {
            skipped += 1;
            continue;
        };

        match guest_repo::insert_guest(
            &pool,
            NewGuest {
                name: guest.name,
                family_id: guest.family_id,
                email: guest.email,
                mobile: guest.mobile,
                address: guest.address,
                attending: "maybe",
            },
        )
        .await
        {
            Ok(_) => imported += 1,
            Err(e) => {
                eprintln!("skipping '{}': {}", guest.name, e);
                skipped += 1;
            }
        }
    }

    println!("guest import: imported={}, skipped={}", imported, skipped);
}
