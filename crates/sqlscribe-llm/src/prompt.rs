//! Prompt construction for column descriptions

use sqlscribe_core::ColumnInfo;

/// Build the description prompt for one column of `sql`
pub fn build_prompt(column: &ColumnInfo, sql: &str) -> String {
    let source_table = column.source_table.as_deref().unwrap_or("no source table");

    let context = format!(
        "This column is part of the table '{table}' and is sourced from '{source_table}' if applicable.\n\
         Original column definition: {definition}\n\
         Source column: {source_column}\n\
         Has transformation: {transformed}",
        table = column.table_name,
        definition = column.full_definition,
        source_column = column.source_column,
        transformed = column.has_transformation,
    );

    format!(
        "Based on this SQL query:\n\
         ```sql\n\
         {sql}\n\
         ```\n\
         \n\
         And this context:\n\
         {context}\n\
         \n\
         Generate a technical description for the column '{qualified}' that includes:\n\
         1. The business purpose of this column\n\
         2. Where the data comes from (source table and column)\n\
         3. Any transformations or filters applied, mention only if applied or else skip mentioning anything about transformation\n\
         4. Any relevant conditions or constraints, mention only if applied or else skip mentioning anything about conditions and constraints\n\
         \n\
         Format as a single paragraph without any markdown or prefixes. Focus on being precise and informative.",
        qualified = column.qualified_name(),
    )
}
