use sqlx::SqlitePool;

use crate::database::guest_repo;

/// Display-ready guest row for the admin table. Optional columns collapse to
/// empty strings so the template stays free of Option handling.
pub struct GuestListItemView {
    pub id: i64,
    pub name: String,
    pub family_label: String,
    pub email: String,
    pub mobile: String,
    pub attending_label: String,
    pub meal_choice: String,
    pub restrictions: String,
    pub updated_at: String,
}

pub struct DashboardView {
    pub total: i64,
    pub attending: i64,
    pub not_attending: i64,
    pub pending: i64,
    pub response_rate_label: String,
    pub guests: Vec<GuestListItemView>,
}

pub fn attending_label(attending: &str) -> &'static str {
    match attending {
        "yes" => "Attending",
        "no" => "Not attending",
        _ => "Pending",
    }
}

fn response_rate_label(total: i64, pending: i64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let rate = (total - pending) as f64 / total as f64 * 100.0;
    format!("{:.1}%", rate)
}

pub async fn build_dashboard(pool: &SqlitePool) -> sqlx::Result<DashboardView> {
    let stats = guest_repo::load_stats(pool).await?;
    let guests = guest_repo::list_all(pool)
        .await?
        .into_iter()
        .map(|g| GuestListItemView {
            id: g.id,
            name: g.name,
            family_label: g.family_id.unwrap_or_default(),
            email: g.email.unwrap_or_default(),
            mobile: g.mobile.unwrap_or_default(),
            attending_label: attending_label(&g.attending).to_string(),
            meal_choice: g.meal_choice.unwrap_or_default(),
            restrictions: g.restrictions.unwrap_or_default(),
            updated_at: g.updated_at,
        })
        .collect();

    Ok(DashboardView {
        total: stats.total,
        attending: stats.attending,
        not_attending: stats.not_attending,
        pending: stats.pending,
        response_rate_label: response_rate_label(stats.total, stats.pending),
        guests,
    })
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Guest list as a CSV document for the admin export download.
pub async fn render_guest_csv(pool: &SqlitePool) -> sqlx::Result<String> {
    let guests = guest_repo::list_all(pool).await?;

    let mut out = String::from(
        "id,name,family_id,email,mobile,attending,meal_choice,restrictions,created_at\n",
    );
    for g in guests {
        let row = [
            g.id.to_string(),
            g.name,
            g.family_id.unwrap_or_default(),
            g.email.unwrap_or_default(),
            g.mobile.unwrap_or_default(),
            attending_label(&g.attending).to_string(),
            g.meal_choice.unwrap_or_default(),
            g.restrictions.unwrap_or_default(),
            g.created_at,
        ];
        let row: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use sqlx::sqlite::SqlitePoolOptions;

    #[test]
    fn csv_fields_with_commas_and_quotes_are_escaped() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn response_rate_covers_empty_list() {
        assert_eq!(response_rate_label(0, 0), "0.0%");
        assert_eq!(response_rate_label(4, 1), "75.0%");
    }

    #[tokio::test]
    async fn dashboard_and_export_cover_all_guests() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("pool");
        schema::init(&pool).await.expect("schema");

        guest_repo::insert_guest(
            &pool,
            guest_repo::NewGuest {
                name: "Smith, John",
                family_id: Some("smith"),
                email: Some("john@example.com"),
                mobile: None,
                address: None,
                attending: "yes",
            },
        )
        .await
        .expect("seed");

        let dashboard = build_dashboard(&pool).await.expect("dashboard");
        assert_eq!(dashboard.total, 1);
        assert_eq!(dashboard.attending, 1);
        assert_eq!(dashboard.response_rate_label, "100.0%");
        assert_eq!(dashboard.guests[0].attending_label, "Attending");

        let csv = render_guest_csv(&pool).await.expect("csv");
        let mut lines = csv.lines();
        assert!(lines.next().expect("header").starts_with("id,name"));
        let row = lines.next().expect("row");
        assert!(row.contains("\"Smith, John\""));
        assert!(row.contains("Attending"));
    }
}
