//! Terminal viewer: a block list on the left, a styled preview on the right.
//!
//! Edits go through the same commands as the library API, so the preview
//! always shows a normalized tree.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_richtext_engine::{
    Block, BlockPath, Cmd, Document, Inline, InlineKind, Leaf, ListKind, Mark, SerializeOptions,
    io, serialize_with,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as Panel, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    fs,
    io::{Stdout, stdout},
    path::PathBuf,
};

struct App {
    file: PathBuf,
    options: SerializeOptions,
    document: Document,
    block_list_state: ListState,
    status: String,
}

impl App {
    fn new(file: PathBuf, options: SerializeOptions) -> Result<Self> {
        let document = io::read_markdown(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        Ok(Self::with_document(file, options, document))
    }

    fn with_document(file: PathBuf, options: SerializeOptions, document: Document) -> Self {
        let mut app = Self {
            file,
            options,
            document,
            block_list_state: ListState::default(),
            status: String::new(),
        };

        // Select first block if available
        if !app.document.is_empty() {
            app.block_list_state.select(Some(0));
        }
        app
    }

    fn selected_path(&self) -> Option<BlockPath> {
        self.block_list_state.selected().map(BlockPath::from)
    }

    fn next_block(&mut self) {
        let len = self.document.blocks().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.block_list_state.select(Some(i));
    }

    fn previous_block(&mut self) {
        let len = self.document.blocks().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.block_list_state.select(Some(i));
    }

    fn apply(&mut self, cmd: Cmd) {
        let before = self.document.version();
        match self.document.apply(cmd) {
            Ok(patch) if patch.version != before => {
                self.status = format!("changed {} (v{})", patch.changed, patch.version);
            }
            Ok(_) => self.status = "nothing to change".to_string(),
            Err(e) => self.status = e.to_string(),
        }

        // Removing blocks can leave the selection past the end
        let len = self.document.blocks().len();
        if let Some(i) = self.block_list_state.selected()
            && i >= len
        {
            self.block_list_state.select(len.checked_sub(1));
        }
    }

    fn indent_selected(&mut self) {
        if let Some(at) = self.selected_path() {
            self.apply(Cmd::Indent { at });
        }
    }

    fn outdent_selected(&mut self) {
        if let Some(at) = self.selected_path() {
            self.apply(Cmd::Outdent { at });
        }
    }

    /// Applies `mark` to the whole selected block, or removes it when every
    /// character already carries it.
    fn toggle_mark(&mut self, mark: Mark) {
        let Some(block) = self.selected_path() else {
            return;
        };
        let Some(inlines) = self.document.get(&block).and_then(Block::inlines) else {
            self.status = format!("Block {block} does not hold inline text");
            return;
        };
        let len = inlines_text(inlines).chars().count();
        let active = !fully_marked(inlines, mark);
        self.apply(Cmd::SetMark {
            block,
            range: 0..len,
            mark,
            active,
        });
    }

    fn save(&mut self) -> Result<()> {
        fs::write(&self.file, serialize_with(&self.document, &self.options))
            .with_context(|| format!("Failed to write {}", self.file.display()))?;
        self.status = format!("wrote {}", self.file.display());
        Ok(())
    }
}

fn inlines_text(inlines: &[Inline]) -> String {
    Block::paragraph(inlines.to_vec()).plain_text()
}

/// Every leaf with text carries `mark`. Images have no text and are skipped.
fn fully_marked(inlines: &[Inline], mark: Mark) -> bool {
    let mut leaves = inlines
        .iter()
        .flat_map(|inline| match inline {
            Inline::Leaf(leaf) => std::slice::from_ref(leaf),
            Inline::Element(el) => match el.kind {
                InlineKind::Link { .. } => el.children.as_slice(),
                InlineKind::Image { .. } => Default::default(),
            },
        })
        .filter(|leaf| !leaf.text.is_empty())
        .peekable();
    leaves.peek().is_some() && leaves.all(|leaf| leaf.has(mark))
}

pub fn run(file: PathBuf, options: SerializeOptions) -> Result<()> {
    let mut app = App::new(file, options)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_block(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_block(),
                KeyCode::Tab => app.indent_selected(),
                KeyCode::BackTab => app.outdent_selected(),
                KeyCode::Char('b') => app.toggle_mark(Mark::Bold),
                KeyCode::Char('i') => app.toggle_mark(Mark::Italic),
                KeyCode::Char('s') => app.toggle_mark(Mark::Strike),
                KeyCode::Char('c') => app.toggle_mark(Mark::Code),
                KeyCode::Char('w') => {
                    if let Err(e) = app.save() {
                        app.status = format!("{e:#}");
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    // Block list panel
    let block_items: Vec<ListItem> = app
        .document
        .blocks()
        .iter()
        .map(|block| ListItem::new(Line::from(block_summary(block))))
        .collect();

    let block_list = List::new(block_items)
        .block(Panel::default().borders(Borders::ALL).title("Blocks"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(block_list, chunks[0], &mut app.block_list_state);

    // Preview panel
    let preview_text = if app.document.is_empty() {
        vec![Line::from("Empty document")]
    } else {
        render_blocks(app.document.blocks())
    };
    let title = format!("{} (v{})", app.file.display(), app.document.version());
    let preview = Paragraph::new(preview_text)
        .block(Panel::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(preview, chunks[1]);

    // Instructions
    let help_text = vec![
        Line::from(vec![
            Span::raw("q: Quit | "),
            Span::raw("↑/k ↓/j: Select | "),
            Span::raw("Tab/Shift-Tab: Indent/Outdent | "),
            Span::raw("b/i/s/c: Toggle mark | "),
            Span::raw("w: Write"),
        ]),
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(help_text), rows[1]);
}

fn block_summary(block: &Block) -> String {
    let indent = "  ".repeat(block.list_depth().unwrap_or(0));
    let text = block.plain_text();
    let first_line = text.lines().next().unwrap_or_default();
    format!("{indent}{} {first_line}", block.tag().as_str())
}

fn render_blocks(blocks: &[Block]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        let tight = i > 0 && blocks[i - 1].is_list_item() && block.is_list_item();
        if i > 0 && !tight {
            lines.push(Line::default());
        }
        lines.extend(render_block(block));
    }
    lines
}

fn render_block(block: &Block) -> Vec<Line<'static>> {
    match block {
        Block::Paragraph { children } => inline_lines(children, Vec::new(), Style::default()),
        Block::Heading { level, children } => {
            let prefix = Span::styled(
                format!("{} ", "#".repeat(usize::from(*level))),
                Style::default().fg(Color::Magenta),
            );
            let base = Style::default().add_modifier(Modifier::BOLD);
            inline_lines(children, vec![prefix], base)
        }
        Block::ListItem {
            kind,
            depth,
            children,
        } => {
            let bullet = match kind {
                ListKind::Unordered => "•",
                ListKind::Ordered => "#.",
                ListKind::Task { checked: false } => "☐",
                ListKind::Task { checked: true } => "☑",
            };
            let prefix = Span::raw(format!("{}{bullet} ", "  ".repeat(*depth)));
            inline_lines(children, vec![prefix], Style::default())
        }
        Block::CodeBlock { language, code } => {
            let style = Style::default().fg(Color::Yellow);
            let mut lines = vec![Line::from(Span::styled(
                format!("```{}", language.as_deref().unwrap_or_default()),
                Style::default().fg(Color::DarkGray),
            ))];
            lines.extend(code.lines().map(|l| Line::from(Span::styled(l.to_string(), style))));
            lines.push(Line::from(Span::styled(
                "```",
                Style::default().fg(Color::DarkGray),
            )));
            lines
        }
        Block::ImageBlock { url, alt, .. } => vec![Line::from(Span::styled(
            format!("[image: {alt}] {url}"),
            Style::default().fg(Color::Green),
        ))],
        Block::BlockQuote { children } => render_blocks(children)
            .into_iter()
            .map(|line| {
                let mut spans = vec![Span::styled("│ ", Style::default().fg(Color::DarkGray))];
                spans.extend(line.spans);
                Line::from(spans)
            })
            .collect(),
        Block::HorizontalRule => vec![Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(Color::DarkGray),
        ))],
    }
}

fn leaf_style(leaf: &Leaf, base: Style) -> Style {
    let mut style = base;
    if leaf.has(Mark::Bold) {
        style = style.add_modifier(Modifier::BOLD);
    }
    if leaf.has(Mark::Italic) {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if leaf.has(Mark::Strike) {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if leaf.has(Mark::Code) {
        style = style.fg(Color::Cyan);
    }
    style
}

/// Styled lines for a run of inlines, starting the first line with `prefix`.
fn inline_lines(inlines: &[Inline], prefix: Vec<Span<'static>>, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current = prefix;

    let mut push_text = |text: &str, style: Style, current: &mut Vec<Span<'static>>| {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next()
            && !first.is_empty()
        {
            current.push(Span::styled(first.to_string(), style));
        }
        for part in parts {
            lines.push(Line::from(std::mem::take(current)));
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
        }
    };

    for inline in inlines {
        match inline {
            Inline::Leaf(leaf) => push_text(&leaf.text, leaf_style(leaf, base), &mut current),
            Inline::Element(el) => match &el.kind {
                InlineKind::Link { .. } => {
                    let link = base.fg(Color::Blue).add_modifier(Modifier::UNDERLINED);
                    for leaf in &el.children {
                        push_text(&leaf.text, leaf_style(leaf, link), &mut current);
                    }
                }
                InlineKind::Image { alt, .. } => {
                    push_text(&format!("[image: {alt}]"), base.fg(Color::Green), &mut current);
                }
            },
        }
    }
    lines.push(Line::from(current));
    lines
}
