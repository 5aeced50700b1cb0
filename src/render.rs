use crate::app::App;
use crate::maze::{Pos, Tile};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use rand::Rng;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;
const FOOTER_LINES: usize = 3;
const HELP: &str = "arrows/wasd move, shift dash, r new maze, q quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Player,
    Goal,
    Wall,
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Path,
    color: Color::Reset,
};

/// Redraws only the cells and lines that changed since the last frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    last_footer: Vec<String>,
    last_generation: Option<u32>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![BLANK; width * height],
            last_hud: String::new(),
            last_footer: vec![String::new(); FOOTER_LINES],
            last_generation: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

/// Columns and rows the frame needs, or `None` when no terminal could hold it.
pub fn needed_size(width: usize, height: usize) -> Option<(u16, u16)> {
    let w = width.checked_mul(CELL_W)?;
    let h = height.checked_add(1 + FOOTER_LINES)?;
    Some((u16::try_from(w).ok()?, u16::try_from(h).ok()?))
}

pub fn render<R: Rng>(
    out: &mut impl Write,
    app: &App<R>,
    renderer: &mut Renderer,
    term_size: (u16, u16),
) -> io::Result<()> {
    let grid = app.session.grid();
    let (term_w, term_h) = term_size;

    out.queue(MoveTo(0, 0))?;

    let fits = needed_size(grid.width(), grid.height())
        .filter(|&(w, h)| term_w >= w && term_h >= h);
    let Some((needed_w, needed_h)) = fits else {
        out.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            grid.width().saturating_mul(CELL_W),
            grid.height().saturating_add(1 + FOOTER_LINES),
            term_w,
            term_h
        );
        out.queue(Print(msg))?;
        out.flush()?;
        renderer.needs_full = true;
        return Ok(());
    };

    let generation = app.session.generation();
    if renderer.last_generation != Some(generation) {
        renderer.last_generation = Some(generation);
        renderer.needs_full = true;
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        out.queue(Clear(ClearType::All))?;
    }

    let hud = hud_line(app);
    if renderer.needs_full || hud != renderer.last_hud {
        draw_line(out, renderer.origin_x, renderer.origin_y - 1, &hud, Color::White)?;
        renderer.last_hud = hud;
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = cell_for(app, Pos::new(x, y));
            let idx = y * grid.width() + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(out, renderer, x, y, cell)?;
            }
        }
    }

    let footer = footer_lines(app);
    let footer_y = renderer.origin_y + grid.height() as u16;
    for (i, line) in footer.iter().enumerate() {
        if renderer.needs_full || *line != renderer.last_footer[i] {
            draw_line(out, renderer.origin_x, footer_y + i as u16, line, Color::Yellow)?;
        }
    }
    renderer.last_footer = footer;
    renderer.needs_full = false;

    out.flush()?;
    Ok(())
}

fn hud_line<R: Rng>(app: &App<R>) -> String {
    format!(
        "{}  Maze #{}  ({})",
        app.status(),
        app.session.generation() + 1,
        HELP
    )
}

fn footer_lines<R: Rng>(app: &App<R>) -> Vec<String> {
    match app.dialog() {
        Some(dialog) => vec![
            format!("Secret phrase: {}_", dialog.guess),
            dialog.reveal.as_ref().map(|r| r.message()).unwrap_or_default(),
            "(Enter to reveal, Esc to close)".to_string(),
        ],
        None => vec![String::new(); FOOTER_LINES],
    }
}

fn cell_for<R: Rng>(app: &App<R>, pos: Pos) -> Cell {
    if pos == app.session.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == app.session.goal() {
        return Cell {
            glyph: Glyph::Goal,
            color: Color::Red,
        };
    }
    match app.session.grid().tile(pos) {
        Some(Tile::Wall) => Cell {
            glyph: Glyph::Wall,
            color: Color::DarkGrey,
        },
        _ => BLANK,
    }
}

fn draw_line(out: &mut impl Write, x: u16, y: u16, text: &str, color: Color) -> io::Result<()> {
    out.queue(MoveTo(x, y))?;
    out.queue(Clear(ClearType::UntilNewLine))?;
    out.queue(SetForegroundColor(color))?;
    out.queue(Print(text))?;
    out.queue(ResetColor)?;
    Ok(())
}

fn draw_cell(out: &mut impl Write, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "🙂",
        Glyph::Goal => "💖",
        Glyph::Wall => "██",
        Glyph::Path => "  ",
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    out.queue(MoveTo(x_pos, y_pos))?;
    out.queue(SetForegroundColor(cell.color))?;
    out.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            out.queue(Print(' '))?;
        }
    }
    out.queue(ResetColor)?;
    Ok(())
}
