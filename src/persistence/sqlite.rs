//! SQLite implementation of the entity store.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::{EntityStore, latest_first, venue_in_use};
use crate::domain::show::{format_start_time, parse_start_time};
use crate::domain::{
    Artist, ArtistId, ArtistProfile, Genres, NewShow, Show, ShowId, Venue, VenueId, VenueProfile,
};
use crate::error::{DirectoryError, EntityKind};

const VENUE_COLUMNS: &str = "id, name, city, state, address, genres, phone, image_link, \
     facebook_link, website, seeking_talent, seeking_description";

const ARTIST_COLUMNS: &str = "id, name, city, state, genres, phone, image_link, \
     facebook_link, website, seeking_venue, seeking_description";

const SHOW_COLUMNS: &str = "id, venue_id, artist_id, start_time";

/// SQLite-backed entity store using `sqlx::SqlitePool`.
///
/// Writes go through an immediate transaction that is committed only after
/// every check and insert succeeded; dropping it on an early return rolls
/// back. Connections wait up to the connect timeout for a busy database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `database_url` and runs
    /// the embedded migrations.
    ///
    /// In-memory URLs get a single long-lived connection, since every
    /// connection to `:memory:` would otherwise see its own database.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] if the URL is invalid, the
    /// database cannot be opened, or a migration fails.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(connect_timeout);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(connect_timeout);
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(database_url, in_memory, "sqlite store ready");
        Ok(Self { pool })
    }

    /// Fresh private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Persistence`] if migrations fail.
    pub async fn in_memory() -> Result<Self, DirectoryError> {
        Self::connect("sqlite::memory:", 1, Duration::from_secs(5)).await
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens a write transaction holding SQLite's write lock from the first
    /// statement, so a read-then-write sequence never has to upgrade its
    /// lock while another connection holds one.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, DirectoryError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    async fn fetch_shows(
        &self,
        filter: &str,
        id: Option<i64>,
    ) -> Result<Vec<Show>, DirectoryError> {
        let sql = format!("SELECT {SHOW_COLUMNS} FROM shows {filter} ORDER BY id");
        let mut query = sqlx::query_as::<_, ShowRow>(&sql);
        if let Some(id) = id {
            query = query.bind(id);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Show::from).collect())
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn create_venue(&self, profile: &VenueProfile) -> Result<Venue, DirectoryError> {
        let mut tx = self.begin_write().await?;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO venues (name, city, state, address, genres, phone, image_link, \
             facebook_link, website, seeking_talent, seeking_description) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.address)
        .bind(profile.genres.to_delimited())
        .bind(&profile.phone)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_talent)
        .bind(&profile.seeking_description)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Venue {
            id: VenueId::new(id),
            profile: profile.clone(),
        })
    }

    async fn create_artist(&self, profile: &ArtistProfile) -> Result<Artist, DirectoryError> {
        let mut tx = self.begin_write().await?;
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO artists (name, city, state, genres, phone, image_link, \
             facebook_link, website, seeking_venue, seeking_description) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&profile.name)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(profile.genres.to_delimited())
        .bind(&profile.phone)
        .bind(&profile.image_link)
        .bind(&profile.facebook_link)
        .bind(&profile.website)
        .bind(profile.seeking_venue)
        .bind(&profile.seeking_description)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Artist {
            id: ArtistId::new(id),
            profile: profile.clone(),
        })
    }

    async fn create_show(&self, show: &NewShow) -> Result<Show, DirectoryError> {
        let mut tx = self.begin_write().await?;

        let venue = sqlx::query_scalar::<_, i64>("SELECT id FROM venues WHERE id = ?")
            .bind(show.venue_id.get())
            .fetch_optional(&mut *tx)
            .await?;
        if venue.is_none() {
            return Err(DirectoryError::Reference {
                entity: EntityKind::Venue,
                id: show.venue_id.get(),
            });
        }

        let artist = sqlx::query_scalar::<_, i64>("SELECT id FROM artists WHERE id = ?")
            .bind(show.artist_id.get())
            .fetch_optional(&mut *tx)
            .await?;
        if artist.is_none() {
            return Err(DirectoryError::Reference {
                entity: EntityKind::Artist,
                id: show.artist_id.get(),
            });
        }

        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(show.venue_id.get())
        .bind(show.artist_id.get())
        .bind(format_start_time(show.start_time))
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Show {
            id: ShowId::new(id),
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: Some(show.start_time),
        })
    }

    async fn venue(&self, id: VenueId) -> Result<Option<Venue>, DirectoryError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?");
        let row = sqlx::query_as::<_, VenueRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Venue::from))
    }

    async fn artist(&self, id: ArtistId) -> Result<Option<Artist>, DirectoryError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?");
        let row = sqlx::query_as::<_, ArtistRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Artist::from))
    }

    async fn list_venues(&self) -> Result<Vec<Venue>, DirectoryError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id");
        let rows = sqlx::query_as::<_, VenueRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn list_artists(&self) -> Result<Vec<Artist>, DirectoryError> {
        let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists ORDER BY id");
        let rows = sqlx::query_as::<_, ArtistRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Artist::from).collect())
    }

    async fn list_shows(&self) -> Result<Vec<Show>, DirectoryError> {
        self.fetch_shows("", None).await
    }

    async fn shows_for_venue(&self, id: VenueId) -> Result<Vec<Show>, DirectoryError> {
        let mut shows = self.fetch_shows("WHERE venue_id = ?", Some(id.get())).await?;
        latest_first(&mut shows);
        Ok(shows)
    }

    async fn shows_for_artist(&self, id: ArtistId) -> Result<Vec<Show>, DirectoryError> {
        let mut shows = self
            .fetch_shows("WHERE artist_id = ?", Some(id.get()))
            .await?;
        latest_first(&mut shows);
        Ok(shows)
    }

    async fn delete_venue(&self, id: VenueId) -> Result<(), DirectoryError> {
        let mut tx = self.begin_write().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM venues WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DirectoryError::VenueNotFound(id));
        }

        let dependents =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shows WHERE venue_id = ?")
                .bind(id.get())
                .fetch_one(&mut *tx)
                .await?;
        if dependents > 0 {
            return Err(venue_in_use(id, usize::try_from(dependents).unwrap_or(usize::MAX)));
        }

        sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), DirectoryError> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

// ── Row mapping ─────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct VenueRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    genres: String,
    phone: Option<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        Self {
            id: VenueId::new(row.id),
            profile: VenueProfile {
                name: row.name,
                city: row.city,
                state: row.state,
                address: row.address,
                genres: Genres::parse_delimited(&row.genres),
                phone: row.phone,
                image_link: row.image_link,
                facebook_link: row.facebook_link,
                website: row.website,
                seeking_talent: row.seeking_talent,
                seeking_description: row.seeking_description,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    genres: String,
    phone: Option<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
}

impl From<ArtistRow> for Artist {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: ArtistId::new(row.id),
            profile: ArtistProfile {
                name: row.name,
                city: row.city,
                state: row.state,
                genres: Genres::parse_delimited(&row.genres),
                phone: row.phone,
                image_link: row.image_link,
                facebook_link: row.facebook_link,
                website: row.website,
                seeking_venue: row.seeking_venue,
                seeking_description: row.seeking_description,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShowRow {
    id: i64,
    venue_id: i64,
    artist_id: i64,
    start_time: Option<String>,
}

impl From<ShowRow> for Show {
    fn from(row: ShowRow) -> Self {
        let start_time = row.start_time.as_deref().and_then(|raw| {
            let parsed = parse_start_time(raw);
            if parsed.is_none() {
                tracing::warn!(show_id = row.id, raw, "unparseable stored start_time");
            }
            parsed
        });
        Self {
            id: ShowId::new(row.id),
            venue_id: VenueId::new(row.venue_id),
            artist_id: ArtistId::new(row.artist_id),
            start_time,
        }
    }
}
