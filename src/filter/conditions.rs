use chrono::NaiveDate;
use uuid::Uuid;

/// A typed value destined for a numbered SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Uuid(Uuid),
    Int(i64),
    Bool(bool),
    Date(NaiveDate),
}

/// Composable WHERE-clause fragment. Column names are compile-time
/// identifiers picked by the repositories (or the sort whitelist), never
/// request input, so no runtime identifier validation is needed.
#[derive(Debug, Clone)]
pub enum Cond {
    Eq(&'static str, FilterValue),
    /// Case-insensitive substring match. The needle is escaped and wrapped
    /// in wildcards here; callers pass the raw search term.
    Contains(&'static str, String),
    And(Vec<Cond>),
    Or(Vec<Cond>),
}

impl Cond {
    /// Render this condition, pushing parameter values in placeholder order.
    /// Placeholders continue from `params.len() + 1`.
    pub fn to_sql(&self, params: &mut Vec<FilterValue>) -> String {
        match self {
            Cond::Eq(column, value) => {
                params.push(value.clone());
                format!("\"{}\" = ${}", column, params.len())
            }
            Cond::Contains(column, needle) => {
                params.push(FilterValue::Text(format!("%{}%", escape_like(needle))));
                format!("\"{}\" ILIKE ${}", column, params.len())
            }
            Cond::And(conds) => join_group(conds, " AND ", params),
            Cond::Or(conds) => join_group(conds, " OR ", params),
        }
    }
}

fn join_group(conds: &[Cond], joiner: &str, params: &mut Vec<FilterValue>) -> String {
    match conds.len() {
        0 => "1=1".to_string(),
        1 => conds[0].to_sql(params),
        _ => {
            let parts: Vec<String> = conds.iter().map(|c| format!("({})", c.to_sql(params))).collect();
            parts.join(joiner)
        }
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_numbers_params_in_order() {
        let mut params = vec![];
        let sql = Cond::And(vec![
            Cond::Eq("status", FilterValue::Text("pending".into())),
            Cond::Eq("priority", FilterValue::Text("high".into())),
        ])
        .to_sql(&mut params);

        assert_eq!(sql, r#"("status" = $1) AND ("priority" = $2)"#);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn contains_wraps_and_escapes_needle() {
        let mut params = vec![];
        let sql = Cond::Contains("title", "50%_done".to_string()).to_sql(&mut params);

        assert_eq!(sql, r#""title" ILIKE $1"#);
        assert_eq!(params[0], FilterValue::Text("%50\\%\\_done%".to_string()));
    }

    #[test]
    fn or_group_spans_columns() {
        let mut params = vec![FilterValue::Bool(true)]; // placeholder numbering continues
        let sql = Cond::Or(vec![
            Cond::Contains("title", "milk".to_string()),
            Cond::Contains("description", "milk".to_string()),
        ])
        .to_sql(&mut params);

        assert_eq!(sql, r#"("title" ILIKE $2) OR ("description" ILIKE $3)"#);
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn empty_group_is_always_true() {
        let mut params = vec![];
        assert_eq!(Cond::And(vec![]).to_sql(&mut params), "1=1");
        assert!(params.is_empty());
    }
}
