// tests/export.rs
use std::fs;
use std::path::PathBuf;

use arcade_board::config::options::{AppOptions, ExportFormat, RankDisplay, YesMatch};
use arcade_board::csv::Table;
use arcade_board::data::Leaderboard;
use arcade_board::file;
use arcade_board::filter::{Query, StatusFilter, View, EXPORT_HEADERS};

const SHEET: &str = "\
User Name,Access Code Redemption Status,# of Skill Badges Completed,Names of Completed Skill Badges,# of Arcade Games Completed,Names of Completed Arcade Games,All Skill Badges & Games Completed
Ada,Yes,2,\"Gemini, Intro|Looker\",1,Trivia,No
Bo,No,0,,0,,No
Cy,Yes,7,A|B,0,,No
";

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("arcade_board_export_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn board() -> Leaderboard {
    Leaderboard::build(&Table::parse(SHEET, ',').unwrap(), &AppOptions::default())
}

#[test]
fn export_writes_filtered_view_and_creates_dirs() {
    let board = board();
    let q = Query { status: StatusFilter::InProgress, ..Query::default() };
    let view = View::build(&board, &q, YesMatch::IgnoreCase, RankDisplay::Canonical);

    let mut opts = AppOptions::default();
    opts.export.format = ExportFormat::Tsv;
    let dir = tmp_dir("tsv");
    opts.export.out_path = Some(dir.join("nested").join("board.tsv"));

    let path = file::write_export(&opts.export, &view).unwrap();
    assert!(path.ends_with("nested/board.tsv"));

    let text = fs::read_to_string(&path).unwrap();
    let back = Table::parse(&text, '\t').unwrap();
    assert_eq!(back.headers, EXPORT_HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    assert_eq!(back.row_count(), 2);

    let first: Vec<&str> = back.rows[0].iter().map(String::as_str).collect();
    assert_eq!(first, vec!["1", "Cy", "Yes", "7", "0", "No", "A|B", ""]);
    // embedded comma needs no quoting in TSV
    assert_eq!(back.rows[1][6], "Gemini, Intro|Looker");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn copy_text_quotes_csv_fields() {
    let board = board();
    let q = Query::search("ada");
    let view = View::build(&board, &q, YesMatch::IgnoreCase, RankDisplay::Renumber);
    let text = file::to_export_string(&view, ExportFormat::Csv);

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(EXPORT_HEADERS.join(",").as_str()));
    assert_eq!(lines.next(), Some("1,Ada,Yes,2,1,No,\"Gemini, Intro|Looker\",Trivia"));
    assert_eq!(lines.next(), None);
}

#[test]
fn empty_view_exports_headers_only() {
    let board = board();
    let view = View::build(&board, &Query::search("nobody"), YesMatch::IgnoreCase, RankDisplay::Canonical);
    let text = file::to_export_string(&view, ExportFormat::Csv);
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn export_into_a_file_path_parent_fails() {
    let dir = tmp_dir("blocked");
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let board = board();
    let view = View::all(&board);
    let mut opts = AppOptions::default();
    opts.export.out_path = Some(blocker.join("board.csv"));
    assert!(file::write_export(&opts.export, &view).is_err());

    let _ = fs::remove_dir_all(&dir);
}
