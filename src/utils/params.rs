use serde::Deserialize;

/// Raw `/books` query parameters, validated by [`BooksParams::validate`].
#[derive(Debug, Default, Deserialize)]
pub struct BooksParams {
    pub query: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ValidatedParams {
    pub query: String,
    pub limit: usize,
}

impl BooksParams {
    pub fn validate(self) -> Result<ValidatedParams, String> {
        let query = self
            .query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| "query is required".to_string())?;

        let limit = self
            .limit
            .filter(|l| !l.is_empty())
            .ok_or_else(|| "limit is required".to_string())?;

        Ok(ValidatedParams {
            query,
            limit: parse_limit(&limit)?,
        })
    }
}

pub fn parse_limit(raw: &str) -> Result<usize, String> {
    let limit: i64 = raw
        .parse()
        .map_err(|e| format!("processing limit: {}", e))?;

    if limit < 0 {
        return Err("limit cant be a negative number".to_string());
    }

    usize::try_from(limit).map_err(|e| format!("processing limit: {}", e))
}
