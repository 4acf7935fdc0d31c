use diesel::prelude::*;
use diesel::result::Error;
use log::{error, info};

use super::error::StorageError;
use super::models::{NewSubscription, Toggle};
use super::schema;

embed_migrations!();

/// Subscription store backed by a single SQLite table of (user, hashtag) rows.
///
/// Every call writes through to the database, there is no caching layer. The table does not
/// enforce uniqueness: `add_subscription` inserts unconditionally, while `subscribe_if_absent` and
/// the toggle check and write inside one `BEGIN IMMEDIATE` transaction, holding the write lock
/// from the first read.
pub struct DbClient {
    pub conn: SqliteConnection,
}

impl DbClient {
    pub fn new(url: &str) -> Result<DbClient, StorageError> {
        let client = DbClient::connect(url)?;
        embedded_migrations::run(&client.conn)?;
        Ok(client)
    }

    pub fn connect(url: &str) -> Result<DbClient, StorageError> {
        let conn = SqliteConnection::establish(url)?;
        Ok(DbClient { conn })
    }

    pub fn add_subscription(&self, user_id: i64, hashtag: &str) -> Result<(), StorageError> {
        use schema::subscriptions::dsl;

        info!("subscribing user_id: {}, hashtag: {}", user_id, hashtag);

        match diesel::insert_into(dsl::subscriptions)
            .values(&NewSubscription { user_id, hashtag })
            .execute(&self.conn)
        {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("failed to create new subscription: {}", err);
                Err(err.into())
            }
        }
    }

    pub fn remove_subscription(&self, user_id: i64, hashtag: &str) -> Result<(), StorageError> {
        info!("unsubscribing user_id: {}, hashtag: {}", user_id, hashtag);

        match self.delete_subscription(user_id, hashtag) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("failed to unsubscribe: {}", err);
                Err(err.into())
            }
        }
    }

    pub fn remove_all_subscriptions(&self, user_id: i64) -> Result<(), StorageError> {
        use schema::subscriptions::dsl;

        info!("removing all subscriptions of user_id: {}", user_id);

        match diesel::delete(dsl::subscriptions.filter(dsl::user_id.eq(user_id)))
            .execute(&self.conn)
        {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("failed to remove all subscriptions: {}", err);
                Err(err.into())
            }
        }
    }

    /// Distinct hashtags of a user, in the order they were first subscribed to.
    pub fn get_user_tags(&self, user_id: i64) -> Result<Vec<String>, StorageError> {
        use schema::subscriptions::dsl;

        match dsl::subscriptions
            .filter(dsl::user_id.eq(user_id))
            .order(dsl::id)
            .select(dsl::hashtag)
            .load::<String>(&self.conn)
        {
            Ok(result) => Ok(dedup(result)),
            Err(err) => {
                error!("failed to get user tags: {}", err);
                Err(err.into())
            }
        }
    }

    /// Distinct users subscribed to a hashtag, in the order they subscribed.
    pub fn get_users_by_tag(&self, hashtag: &str) -> Result<Vec<i64>, StorageError> {
        use schema::subscriptions::dsl;

        match dsl::subscriptions
            .filter(dsl::hashtag.eq(hashtag))
            .order(dsl::id)
            .select(dsl::user_id)
            .load::<i64>(&self.conn)
        {
            Ok(result) => Ok(dedup(result)),
            Err(err) => {
                error!("failed to get users by tag: {}", err);
                Err(err.into())
            }
        }
    }

    /// Removes the subscription when present, otherwise creates it.
    pub fn toggle_subscription(&self, user_id: i64, hashtag: &str) -> Result<Toggle, StorageError> {
        info!("toggling user_id: {}, hashtag: {}", user_id, hashtag);

        match self.conn.immediate_transaction::<_, Error, _>(|| {
            if self.delete_subscription(user_id, hashtag)? > 0 {
                return Ok(Toggle::Unsubscribed);
            }
            self.insert_subscription(user_id, hashtag)?;
            Ok(Toggle::Subscribed)
        }) {
            Ok(toggle) => Ok(toggle),
            Err(err) => {
                error!("failed to toggle subscription: {}", err);
                Err(err.into())
            }
        }
    }

    /// Returns `false` when the user is already subscribed.
    pub fn subscribe_if_absent(&self, user_id: i64, hashtag: &str) -> Result<bool, StorageError> {
        use schema::subscriptions::dsl;

        match self.conn.immediate_transaction::<_, Error, _>(|| {
            let existing = dsl::subscriptions
                .filter(dsl::user_id.eq(user_id).and(dsl::hashtag.eq(hashtag)))
                .count()
                .get_result::<i64>(&self.conn)?;
            if existing > 0 {
                return Ok(false);
            }
            self.insert_subscription(user_id, hashtag)?;
            Ok(true)
        }) {
            Ok(created) => Ok(created),
            Err(err) => {
                error!("failed to subscribe: {}", err);
                Err(err.into())
            }
        }
    }

    /// Returns `false` when the user was not subscribed.
    pub fn unsubscribe_if_present(
        &self,
        user_id: i64,
        hashtag: &str,
    ) -> Result<bool, StorageError> {
        info!("unsubscribing user_id: {}, hashtag: {}", user_id, hashtag);

        match self.delete_subscription(user_id, hashtag) {
            Ok(deleted) => Ok(deleted > 0),
            Err(err) => {
                error!("failed to unsubscribe: {}", err);
                Err(err.into())
            }
        }
    }

    fn insert_subscription(&self, user_id: i64, hashtag: &str) -> Result<usize, Error> {
        use schema::subscriptions::dsl;

        diesel::insert_into(dsl::subscriptions)
            .values(&NewSubscription { user_id, hashtag })
            .execute(&self.conn)
    }

    fn delete_subscription(&self, user_id: i64, hashtag: &str) -> Result<usize, Error> {
        use schema::subscriptions::dsl;

        diesel::delete(
            dsl::subscriptions.filter(dsl::user_id.eq(user_id).and(dsl::hashtag.eq(hashtag))),
        )
        .execute(&self.conn)
    }
}

fn dedup<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}
