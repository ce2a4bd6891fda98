use sqlguard_core::splitter::{normalize, split, split_statements, LexicalState, Segmenter};

fn texts(sql: &str) -> Vec<String> {
    split_statements(sql).into_iter().map(String::from).collect()
}

#[test]
fn basic() {
    assert_eq!(texts("SELECT 1; SELECT 2;"), vec!["SELECT 1;", "SELECT 2;"]);
}

#[test]
fn semicolon_in_string_literal() {
    assert_eq!(texts("SELECT ';' AS x;"), vec!["SELECT ';' AS x;"]);
}

#[test]
fn escaped_single_quote() {
    let sql = "INSERT INTO notes VALUES ('it''s; fine'); SELECT 2;";
    assert_eq!(
        texts(sql),
        vec!["INSERT INTO notes VALUES ('it''s; fine');", "SELECT 2;"]
    );
}

#[test]
fn semicolon_in_quoted_identifier() {
    assert_eq!(texts("SELECT \"a;b\" FROM t;"), vec!["SELECT \"a;b\" FROM t;"]);
    assert_eq!(
        texts("SELECT \"a\"\";b\" FROM t; SELECT 2"),
        vec!["SELECT \"a\"\";b\" FROM t;", "SELECT 2;"]
    );
}

#[test]
fn quotes_do_not_nest() {
    // A double quote inside a literal is just text, and vice versa.
    assert_eq!(
        texts(r#"SELECT 'say "hi;"' AS a, "it's;col" FROM t; SELECT 2;"#),
        vec![r#"SELECT 'say "hi;"' AS a, "it's;col" FROM t;"#, "SELECT 2;"]
    );
}

#[test]
fn anonymous_dollar_block() {
    let sql = "DO $$ BEGIN RAISE NOTICE 'hi;there;'; END $$;";
    assert_eq!(texts(sql), vec![sql]);
}

#[test]
fn named_dollar_block() {
    let sql = r#"
        CREATE OR REPLACE FUNCTION bump(v int) RETURNS int AS $fn$
        BEGIN
            -- comment with ; inside the body
            RETURN v + 1;
        END;
        $fn$ LANGUAGE plpgsql;

        SELECT bump(1);
    "#;

    let statements = texts(sql);
    assert_eq!(statements.len(), 2);
    assert!(statements[0].starts_with("CREATE OR REPLACE FUNCTION"));
    assert!(statements[0].ends_with("$fn$ LANGUAGE plpgsql;"));
    assert_eq!(statements[1], "SELECT bump(1);");
}

#[test]
fn mismatched_dollar_tag_does_not_close() {
    let sql = "SELECT $a$ x; $b$ y; $a$; SELECT 2;";
    assert_eq!(texts(sql), vec!["SELECT $a$ x; $b$ y; $a$;", "SELECT 2;"]);
}

#[test]
fn positional_parameters_are_plain_text() {
    assert_eq!(
        texts("SELECT * FROM t WHERE a = $1 AND b = $2; SELECT 3;"),
        vec!["SELECT * FROM t WHERE a = $1 AND b = $2;", "SELECT 3;"]
    );
}

#[test]
fn line_comment_attaches_to_next_statement() {
    assert_eq!(
        texts("-- note; still comment\nSELECT 1;"),
        vec!["-- note; still comment\nSELECT 1;"]
    );
}

#[test]
fn block_comment() {
    assert_eq!(
        texts("SELECT /* a; b */ 1; SELECT 2;"),
        vec!["SELECT /* a; b */ 1;", "SELECT 2;"]
    );
}

#[test]
fn comment_markers_inside_literals() {
    assert_eq!(
        texts("SELECT '--;', '/*;'; SELECT 2;"),
        vec!["SELECT '--;', '/*;';", "SELECT 2;"]
    );
}

#[test]
fn empty_segments_dropped() {
    assert_eq!(texts("   ;;  SELECT 1;;"), vec!["SELECT 1;"]);
    assert!(texts("").is_empty());
    assert!(texts(" \n\t ").is_empty());
    assert!(texts(";;;").is_empty());
}

#[test]
fn missing_final_terminator() {
    assert_eq!(texts("SELECT 1; SELECT 2"), vec!["SELECT 1;", "SELECT 2;"]);
}

#[test]
fn unterminated_literal_absorbs_rest() {
    let split = split("SELECT 1; SELECT 'oops; SELECT 3;");
    assert_eq!(split.statements(), ["SELECT 1;", "SELECT 'oops; SELECT 3;"].as_slice());
    assert_eq!(split.open_context(), Some(LexicalState::InSingleQuotedLiteral));
}

#[test]
fn unterminated_dollar_block_gets_terminator() {
    let split = split("DO $$ BEGIN PERFORM 1");
    assert_eq!(split.statements(), ["DO $$ BEGIN PERFORM 1;"].as_slice());
    assert!(matches!(split.open_context(), Some(LexicalState::InDollarQuote(tag)) if tag.as_str() == "$$"));
}

#[test]
fn unterminated_identifier() {
    let split = split("SELECT \"abc; x");
    assert_eq!(split.statements().len(), 1);
    assert_eq!(split.terminal_state(), LexicalState::InDoubleQuotedIdentifier);
}

#[test]
fn meaningful_content_is_preserved() {
    let sql = "  INSERT INTO t VALUES ('a;b') ;\n\nDO $x$ BEGIN NULL; END $x$ ;  -- tail\nSELECT \"c;\"; ";
    let joined: String = texts(sql).concat();
    let significant = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();

    assert_eq!(significant(&joined), significant(sql));
}

#[test]
fn lazy_iteration_matches_eager_split() {
    let sql = "SELECT 1; /* skip */ ; SELECT 'x;y'; DO $$ ; $$";
    let lazy = normalize(Segmenter::new(sql));
    assert_eq!(lazy, split_statements(sql));
}

#[test]
fn normalizing_split_output_is_a_no_op() {
    let statements = split_statements("SELECT 1; SELECT 2 ; DO $$ x; $$");
    assert_eq!(normalize(&statements), statements);
}

#[test]
fn trailing_line_comment_before_terminator() {
    let sql = "SELECT 1 -- note\n;SELECT 2;";
    let statements = texts(sql);
    assert_eq!(statements, vec!["SELECT 1 -- note\n;", "SELECT 2;"]);

    // Joining the statements back together must not merge them.
    assert_eq!(texts(&statements.join(" ")), statements);
}

#[test]
fn whitespace_before_terminator_is_kept() {
    assert_eq!(texts("SELECT 1 ; SELECT 2 ;"), vec!["SELECT 1 ;", "SELECT 2 ;"]);
}

#[test]
fn dollar_tag_prefix_closes_block() {
    let split = split("DO $a$ x; $a$b; SELECT 2;");
    assert_eq!(split.statements(), ["DO $a$ x; $a$b;", "SELECT 2;"].as_slice());
    assert_eq!(split.terminal_state(), LexicalState::Normal);
}

#[test]
fn open_line_comment_at_end_of_input() {
    let split = split("SELECT 1 -- c");
    assert_eq!(split.statements(), ["SELECT 1 -- c;"].as_slice());
    assert_eq!(split.terminal_state(), LexicalState::InLineComment);
}
