//! SQL quoting helpers (PostgreSQL dialect).

/// Quotes an identifier unless it is a plain lowercase name.
pub fn quote_identifier(name: &str) -> String {
    let plain = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Quotes a possibly schema-qualified table name part by part.
pub fn qualified_table_name(table: &str) -> String {
    table
        .split('.')
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// Escapes a value for use inside a single-quoted string literal.
///
/// Assumes `standard_conforming_strings = on`, so backslashes are literal.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Renders a complete single-quoted string literal.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}
