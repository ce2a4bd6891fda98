/// Keyword phrases rejected by [`KeywordGuard::default`](super::KeywordGuard),
/// checked in this order.
pub const DEFAULT_FORBIDDEN_KEYWORDS: [&str; 6] = [
    "DROP TABLE",
    "DROP DATABASE",
    "TRUNCATE",
    "ALTER SYSTEM",
    "ALTER DATABASE",
    "DROP SCHEMA",
];
