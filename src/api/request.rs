//! URL construction for the commits endpoints.

use crate::error::FetchError;
use crate::models::RepositoryCoordinates;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Build `{base}/repos/{account}/{repository}/commits[/{sha}]`.
///
/// Every path segment is percent-encoded, so an account such as `a b` or a
/// repository containing `/` cannot escape its segment. Empty (or blank)
/// account, repository or sha is rejected before anything goes on the wire.
pub fn commits_url(
    base_url: &str,
    coordinates: &RepositoryCoordinates,
    sha: Option<&str>,
) -> Result<String, FetchError> {
    let account = non_blank(&coordinates.account, "account")?;
    let repository = non_blank(&coordinates.repository, "repository")?;

    let mut url = format!(
        "{}/repos/{}/{}/commits",
        base_url.trim_end_matches('/'),
        urlencoding::encode(account),
        urlencoding::encode(repository)
    );

    if let Some(sha) = sha {
        let sha = non_blank(sha, "commit sha")?;
        url.push('/');
        url.push_str(&urlencoding::encode(sha));
    }

    Ok(url)
}

fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, FetchError> {
    if value.trim().is_empty() {
        return Err(FetchError::invalid_coordinates(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(value)
}
