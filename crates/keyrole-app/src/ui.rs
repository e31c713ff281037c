use std::fmt::Write;

use kanal::AsyncReceiver;
use keyrole_types::{AppEvent, CategoryFilter, ProgressSummary, QuizView, ViewMode, WordRow};
use tokio_util::sync::CancellationToken;

const CARD_WIDTH: usize = 26;
const GRID_COLUMNS: usize = 3;

pub const HELP: &str = "\
Browse
  list                    show the current word list
  search [text]           filter by term, pronunciation or meaning
  category <name|all>     filter by category
  categories              list categories
  clear                   reset search and category
  view grid|list          switch layout
  show <id>               word details
Progress
  learn <id>              toggle learned
  fav <id>                toggle favorite
  stats                   learned and favorite counts
Study aids
  mnemonic <id>           stored mnemonic
  ai <id>                 AI mnemonic
  usage <id>              AI example sentence
  speak [id]              pronounce a word, or the current quiz term
Quiz
  quiz                    start a quiz over learned words
  answer <n> | <n>        pick option n
  next                    next question
  restart                 replay a finished quiz
  exit                    close the quiz
  help | quit";

/// Renders app events to stdout until shutdown
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    max_rows: usize,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    println!("¡Bienvenido! Type help for commands.");

    loop {
        // Drain pending renders before honouring cancellation
        let event = tokio::select! {
            biased;
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        if let AppEvent::Shutdown = event {
            println!("¡Adiós!");
            break;
        }

        if let Some(text) = render_event(&event, max_rows) {
            println!("{text}\n");
        }
    }

    tracing::info!("Renderer stopping");
    Ok(())
}

pub fn render_event(event: &AppEvent, max_rows: usize) -> Option<String> {
    let text = match event {
        AppEvent::ShowWords {
            rows,
            view,
            filter,
            search,
            summary,
        } => render_words(rows, *view, filter, search, summary, max_rows),
        AppEvent::ShowWord(row) => render_detail(row),
        AppEvent::ShowQuiz(view) => render_quiz(view),
        AppEvent::ShowAssist { term, kind, text } => format!("{} for {}:\n{}", kind.label(), term, text),
        AppEvent::ShowCategories(labels) => format!("Categories: {}", labels.join(", ")),
        AppEvent::ShowSummary(summary) => render_summary(summary),
        AppEvent::Status(message) => message.clone(),
        AppEvent::Help => HELP.to_string(),
        AppEvent::Command(_) | AppEvent::AssistReady { .. } | AppEvent::Shutdown => return None,
    };
    Some(text)
}

fn marks(row: &WordRow) -> String {
    let mut marks = String::new();
    if row.learned {
        marks.push_str(" ✓");
    }
    if row.favorite {
        marks.push_str(" ★");
    }
    marks
}

pub fn render_summary(summary: &ProgressSummary) -> String {
    format!(
        "Learned {} of {} ({}%), {} favorites",
        summary.learned, summary.total, summary.percent, summary.favorites
    )
}

pub fn render_words(
    rows: &[WordRow],
    view: ViewMode,
    filter: &CategoryFilter,
    search: &str,
    summary: &ProgressSummary,
    max_rows: usize,
) -> String {
    let mut out = format!("[{filter}]");
    if !search.trim().is_empty() {
        let _ = write!(out, " search \"{}\"", search.trim());
    }
    let _ = writeln!(out, "  {}", render_summary(summary));

    if rows.is_empty() {
        out.push_str("No words found\nTry a different search term or category, or type clear.");
        return out;
    }

    let shown = &rows[..rows.len().min(max_rows.max(1))];
    match view {
        ViewMode::List => {
            for row in shown {
                let _ = writeln!(
                    out,
                    "{:>4}  {:<18} {:<22} {:<12}{}",
                    row.entry.id,
                    row.entry.spanish,
                    row.entry.meaning,
                    row.entry.category,
                    marks(row)
                );
            }
        }
        ViewMode::Grid => {
            for chunk in shown.chunks(GRID_COLUMNS) {
                let mut lines = [String::new(), String::new(), String::new()];
                for row in chunk {
                    let head = format!("#{}{}", row.entry.id, marks(row));
                    let _ = write!(lines[0], "{:<width$}", head, width = CARD_WIDTH);
                    let _ = write!(lines[1], "{:<width$}", row.entry.spanish, width = CARD_WIDTH);
                    let _ = write!(lines[2], "{:<width$}", row.entry.meaning, width = CARD_WIDTH);
                }
                for line in lines {
                    let _ = writeln!(out, "{}", line.trim_end());
                }
                out.push('\n');
            }
        }
    }

    if rows.len() > shown.len() {
        let _ = writeln!(
            out,
            "... {} more, narrow with search or category",
            rows.len() - shown.len()
        );
    }

    out.trim_end().to_string()
}

pub fn render_detail(row: &WordRow) -> String {
    let entry = &row.entry;
    let mut out = format!("#{} {} ({}){}\n", entry.id, entry.spanish, entry.transliteration, marks(row));
    let _ = writeln!(out, "  Meaning:  {}", entry.meaning);
    if let Some(malaysian) = &entry.malaysian {
        let _ = writeln!(out, "  Malay:    {malaysian}");
    }
    let _ = writeln!(out, "  Category: {}", entry.category);
    if let Some(mnemonic) = &entry.mnemonic {
        let _ = writeln!(out, "  Mnemonic: {mnemonic}");
    }
    out.trim_end().to_string()
}

pub fn render_quiz(view: &QuizView) -> String {
    match view {
        QuizView::Empty => {
            "No Words to Quiz\nMark some words as learned first. Type exit to close.".to_string()
        }
        QuizView::Question {
            number,
            total,
            term,
            transliteration,
            malaysian,
            options,
            selected,
            correct,
            score,
        } => {
            let mut out = format!("Question {number} of {total}    Score {score}\n\n  {term} ({transliteration})\n");
            if let Some(gloss) = malaysian {
                let _ = writeln!(out, "  MY: {gloss}");
            }
            out.push('\n');
            for (i, option) in options.iter().enumerate() {
                let mark = match (selected, correct) {
                    (Some(_), Some(answer)) if option == answer => "  ✓",
                    (Some(pick), Some(_)) if option == pick => "  ✗",
                    _ => "",
                };
                let _ = writeln!(out, "  {}) {}{}", i + 1, option, mark);
            }

            match (selected, correct) {
                (Some(pick), Some(answer)) if pick == answer => out.push_str("\nCorrect! Type next."),
                (Some(_), Some(answer)) => {
                    let _ = write!(out, "\nNot quite, it means \"{answer}\". Type next.");
                }
                _ => out.push_str("\nType the option number."),
            }
            out
        }
        QuizView::Completed {
            score,
            total,
            percent,
        } => format!("Quiz complete! {score}/{total} ({percent}%)\nType restart to go again or exit to close."),
    }
}
