//! Prompt text for text-to-SQL generation.
//!
//! The model sees the WCA export schema, the time encoding and a handful of
//! worked queries. It must answer with bare SQL or an `ERROR:` line.

/// Prefix the model uses when a question cannot be answered with SQL.
pub const REFUSAL_PREFIX: &str = "ERROR:";

/// WCA database schema, conventions and example queries.
pub const WCA_SCHEMA: &str = r#"The World Cube Association (WCA) database contains the following tables:

**ranks_single** - World rankings for single solves
Columns: person_id (varchar), event_id (varchar), best (int, centiseconds), world_rank (int), continent_rank (int), country_rank (int)

**ranks_average** - World rankings for averages
Columns: person_id (varchar), event_id (varchar), best (int, centiseconds), world_rank (int), continent_rank (int), country_rank (int)

**results** - Competition results
Columns: id (bigint), competition_id (varchar), event_id (varchar), round_type_id (varchar), pos (int), best (int, centiseconds), average (int, centiseconds), person_name (varchar), person_id (varchar), person_country_id (varchar), format_id (varchar), regional_single_record (varchar), regional_average_record (varchar)

**persons** - Competitor information
Columns: wca_id (varchar), sub_id (int), name (varchar), country_id (varchar), gender (varchar)

**competitions** - Competition details
Columns: id (varchar), name (varchar), city_name (varchar), country_id (varchar), information (text), year (int), month (int), day (int), end_year (int), end_month (int), end_day (int), cancelled (int), event_specs (text), delegates (text), organizers (text), venue (varchar), venue_address (varchar), venue_details (varchar), external_website (varchar), cell_name (varchar), latitude_microdegrees (int), longitude_microdegrees (int)

**events** - Puzzle event information
Columns: id (varchar), name (varchar), rank (int), format (varchar), cell_name (varchar)

**countries** - Country information
Columns: id (varchar), name (varchar), continent_id (varchar), iso2 (varchar)

Common event IDs:
- '333' = 3x3x3 Cube
- '222' = 2x2x2 Cube
- '444' = 4x4x4 Cube
- '555' = 5x5x5 Cube
- '666' = 6x6x6 Cube
- '777' = 7x7x7 Cube
- '333bf' = 3x3x3 Blindfolded
- '333fm' = 3x3x3 Fewest Moves
- '333oh' = 3x3x3 One-Handed
- 'clock' = Clock
- 'minx' = Megaminx
- 'pyram' = Pyraminx
- 'skewb' = Skewb
- 'sq1' = Square-1
- '444bf' = 4x4x4 Blindfolded
- '555bf' = 5x5x5 Blindfolded
- '333mbf' = 3x3x3 Multi-Blind

IMPORTANT NOTES:
- Time values are stored in centiseconds (1/100th of a second). Example: 1000 = 10.00 seconds, 6000 = 1:00.00
- -1 means DNF (Did Not Finish), -2 means DNS (Did Not Start)
- The 'best' column in ranks_single and ranks_average contains the person's best time
- World rank 1 means world record holder

EXAMPLE QUERIES:

World record for 3x3 single:
SELECT p.name, r.best, r.world_rank, p.country_id
FROM ranks_single r
JOIN persons p ON r.person_id = p.wca_id
WHERE r.event_id = '333' AND r.world_rank = 1

Top 10 fastest 3x3 singles:
SELECT p.name, r.best, r.world_rank, p.country_id
FROM ranks_single r
JOIN persons p ON r.person_id = p.wca_id
WHERE r.event_id = '333'
ORDER BY r.world_rank ASC
LIMIT 10

Competition results for a specific event:
SELECT person_name, best, average, pos, competition_id
FROM results
WHERE event_id = '333' AND best > 0
ORDER BY best ASC
LIMIT 20

Person with most competition results:
SELECT person_name, person_id, COUNT(*) as result_count
FROM results
GROUP BY person_id, person_name
ORDER BY result_count DESC
LIMIT 10"#;

/// System prompt: role, schema, and output rules.
pub fn system_prompt() -> String {
    format!(
        "You are a SQL expert for the World Cube Association (WCA) database.\n\n\
         {}\n\n\
         Generate SQL queries based on natural language questions. \
         Return ONLY the SQL query, no explanations or markdown formatting.\n\
         If the question cannot be answered with SQL, return \"{} Cannot be answered with SQL\".",
        WCA_SCHEMA, REFUSAL_PREFIX
    )
}

/// User turn wrapping the question.
pub fn user_prompt(question: &str) -> String {
    format!(
        "User Question: {}\n\n\
         Generate a SQL query that answers this question. \
         Return ONLY the SQL query, no explanations.\n\n\
         SQL Query:",
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_schema() {
        let prompt = system_prompt();
        assert!(prompt.contains("ranks_single"));
        assert!(prompt.contains("centiseconds"));
        assert!(prompt.contains("ERROR: Cannot be answered with SQL"));
    }

    #[test]
    fn test_user_prompt_contains_question() {
        let prompt = user_prompt("What is the world record for 3x3?");
        assert!(prompt.starts_with("User Question: What is the world record for 3x3?"));
        assert!(prompt.ends_with("SQL Query:"));
    }
}
