use strum_macros::Display;

use super::schema::subscriptions;

#[cfg(test)]
#[derive(Debug, Queryable, PartialEq)]
pub struct Subscription {
    pub id: i32,
    pub user_id: i64,
    pub hashtag: String,
}

#[derive(Insertable)]
#[table_name = "subscriptions"]
pub struct NewSubscription<'a> {
    pub user_id: i64,
    pub hashtag: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Toggle {
    #[strum(serialize = "subscribed")]
    Subscribed,
    #[strum(serialize = "unsubscribed")]
    Unsubscribed,
}
