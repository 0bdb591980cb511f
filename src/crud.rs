use anyhow::{anyhow, Ok, Result};
use sqlx::{query, query_as, Pool, Postgres};

use crate::{
    model::MatchModel,
    schema::{CreateMatchSchema, Stat, UpdateMatchSchema},
};

pub async fn crud_get_matches(db: &Pool<Postgres>) -> Result<Vec<MatchModel>, anyhow::Error> {
    let matches: Vec<MatchModel> = query_as(
        r#"
        SELECT id, team_a, team_b, match_date, goals, yellow_cards, red_cards, extra_time
        FROM matches
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
    .map_err(|e| anyhow!("Unable to query matches from db: {}", e))?;

    Ok(matches)
}

pub async fn crud_get_match(
    db: &Pool<Postgres>,
    id: i32,
) -> Result<Option<MatchModel>, anyhow::Error> {
    let match_model: Option<MatchModel> = query_as(
        r#"
        SELECT id, team_a, team_b, match_date, goals, yellow_cards, red_cards, extra_time
        FROM matches
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| anyhow!("Unable to query match {} from db: {}", id, e))?;

    Ok(match_model)
}

pub async fn crud_create_match(db: &Pool<Postgres>, new: &CreateMatchSchema) -> Result<MatchModel> {
    let m: MatchModel = query_as(
        r#"
        INSERT INTO matches (team_a, team_b, match_date, goals, yellow_cards, red_cards, extra_time)
        VALUES ($1, $2, $3, 0, 0, 0, '')
        RETURNING id, team_a, team_b, match_date, goals, yellow_cards, red_cards, extra_time
        "#,
    )
    .bind(&new.home_team)
    .bind(&new.away_team)
    .bind(new.match_date)
    .fetch_one(db)
    .await
    .map_err(|e| anyhow!("Unable to insert match into db: {}", e))?;

    Ok(m)
}

/// Overwrites team names and date only. Returns the number of rows touched.
pub async fn crud_update_match(
    db: &Pool<Postgres>,
    id: i32,
    m: &UpdateMatchSchema,
) -> Result<u64, anyhow::Error> {
    let res = query(r#"UPDATE matches SET (team_a, team_b, match_date) = ($2, $3, $4) WHERE id = $1"#)
        .bind(id)
        .bind(&m.home_team)
        .bind(&m.away_team)
        .bind(m.match_date)
        .execute(db)
        .await
        .map_err(|e| anyhow!("Unable to update match {} in db: {}", id, e))?;

    Ok(res.rows_affected())
}

pub async fn crud_delete_match(db: &Pool<Postgres>, id: i32) -> Result<u64, anyhow::Error> {
    let res = query(r#"DELETE FROM matches WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| anyhow!("Unable to delete match {} from db: {}", id, e))?;

    Ok(res.rows_affected())
}

/// Bumps one counter by one in a single statement, so concurrent increments on the
/// same row are serialized by postgres and none are lost.
pub async fn crud_increment_stat(
    db: &Pool<Postgres>,
    id: i32,
    stat: Stat,
) -> Result<u64, anyhow::Error> {
    let sql = match stat {
        Stat::Goals => r#"UPDATE matches SET goals = goals + 1 WHERE id = $1"#,
        Stat::YellowCards => r#"UPDATE matches SET yellow_cards = yellow_cards + 1 WHERE id = $1"#,
        Stat::RedCards => r#"UPDATE matches SET red_cards = red_cards + 1 WHERE id = $1"#,
    };

    let res = query(sql)
        .bind(id)
        .execute(db)
        .await
        .map_err(|e| anyhow!("Unable to increment {} for match {}: {}", stat.column(), id, e))?;

    Ok(res.rows_affected())
}

pub async fn crud_set_extra_time(
    db: &Pool<Postgres>,
    id: i32,
    extra_time: &str,
) -> Result<u64, anyhow::Error> {
    let res = query(r#"UPDATE matches SET extra_time = $2 WHERE id = $1"#)
        .bind(id)
        .bind(extra_time)
        .execute(db)
        .await
        .map_err(|e| anyhow!("Unable to set extra time for match {}: {}", id, e))?;

    Ok(res.rows_affected())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use futures::future::join_all;

    use super::*;

    fn clasico() -> CreateMatchSchema {
        CreateMatchSchema {
            home_team: "Real Madrid".into(),
            away_team: "Barcelona".into(),
            match_date: NaiveDate::from_ymd_opt(2024, 10, 26).unwrap(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a postgres instance in DATABASE_URL"]
    async fn concurrent_increments_are_not_lost(db: Pool<Postgres>) -> anyhow::Result<()> {
        let m = crud_create_match(&db, &clasico()).await?;

        let bumps = (0..50).map(|_| crud_increment_stat(&db, m.id, Stat::Goals));
        for res in join_all(bumps).await {
            assert_eq!(res?, 1);
        }

        let m = crud_get_match(&db, m.id).await?.unwrap();
        assert_eq!(m.goals, 50);
        assert_eq!(m.yellow_cards, 0);
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a postgres instance in DATABASE_URL"]
    async fn missing_rows_report_zero_affected(db: Pool<Postgres>) -> anyhow::Result<()> {
        assert_eq!(crud_increment_stat(&db, 4242, Stat::RedCards).await?, 0);
        assert_eq!(crud_set_extra_time(&db, 4242, "90+3").await?, 0);
        assert_eq!(crud_delete_match(&db, 4242).await?, 0);
        assert!(crud_get_match(&db, 4242).await?.is_none());
        Ok(())
    }
}
