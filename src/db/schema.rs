table! {
    subscriptions (id) {
        id -> Integer,
        user_id -> BigInt,
        hashtag -> Text,
    }
}
