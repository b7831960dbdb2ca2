//! Attribute name to column resolution.

use std::collections::HashMap;

use crate::ast::{ColumnRef, SelectStatement, TableRef};

/// Resolves user-facing attribute names against a statement's select list.
///
/// A name matching a column alias resolves to that column's reference.
/// Any other name becomes a column of the primary table. The alias table is
/// built once per compile call and borrows the statement for that call only.
#[derive(Debug)]
pub struct AliasResolver<'a> {
    aliases: HashMap<&'a str, &'a ColumnRef>,
    primary_table: Option<&'a str>,
}

impl<'a> AliasResolver<'a> {
    /// Builds the alias table for a statement.
    #[must_use]
    pub fn new(ast: &'a SelectStatement) -> Self {
        let mut aliases = HashMap::with_capacity(ast.columns.len());
        for column in &ast.columns {
            if let Some(alias) = column.alias.as_deref() {
                // First declaration of an alias wins.
                aliases.entry(alias).or_insert(&column.expr);
            }
        }

        Self {
            aliases,
            primary_table: ast.primary_table().and_then(TableRef::qualifier),
        }
    }

    /// Returns the column an attribute name designates.
    #[must_use]
    pub fn resolve(&self, attribute: &str) -> ColumnRef {
        self.aliases.get(attribute).map_or_else(
            || ColumnRef {
                table: self.primary_table.map(str::to_string),
                column: attribute.to_string(),
            },
            |column| (*column).clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SelectColumn;

    fn statement() -> SelectStatement {
        SelectStatement::from_table(TableRef::table("t"))
            .column(SelectColumn::new(ColumnRef::qualified("t", "col1")))
            .column(SelectColumn::with_alias(
                ColumnRef::qualified("t", "col3"),
                "columnAlias",
            ))
            .column(SelectColumn::with_alias(
                ColumnRef::qualified("t", "col4"),
                "columnAlias",
            ))
    }

    #[test]
    fn test_resolves_alias_to_column() {
        let ast = statement();
        let resolver = AliasResolver::new(&ast);
        assert_eq!(
            resolver.resolve("columnAlias"),
            ColumnRef::qualified("t", "col3")
        );
    }

    #[test]
    fn test_unknown_name_is_primary_table_column() {
        let ast = statement();
        let resolver = AliasResolver::new(&ast);
        assert_eq!(resolver.resolve("other"), ColumnRef::qualified("t", "other"));
    }

    #[test]
    fn test_column_name_is_not_an_alias() {
        let ast = SelectStatement::from_table(TableRef::table("users").alias("u")).column(
            SelectColumn::with_alias(ColumnRef::qualified("u", "name"), "label"),
        );
        let resolver = AliasResolver::new(&ast);
        assert_eq!(resolver.resolve("name"), ColumnRef::qualified("u", "name"));
        assert_eq!(resolver.resolve("label"), ColumnRef::qualified("u", "name"));
    }

    #[test]
    fn test_without_from_clause() {
        let ast = SelectStatement::default();
        let resolver = AliasResolver::new(&ast);
        assert_eq!(resolver.resolve("id"), ColumnRef::new("id"));
    }
}
