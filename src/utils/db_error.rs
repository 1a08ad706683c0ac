//! Classification of SQLx errors.

/// Name of the primary key constraint on `link_bundles.vanity_url`.
pub const VANITY_URL_CONSTRAINT: &str = "link_bundles_pkey";

/// Returns true if the error is a unique violation on the vanity link.
pub fn is_unique_violation_on_vanity_url(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(VANITY_URL_CONSTRAINT))
}
