use crossterm::{cursor, execute, queue, terminal};
use std::io;
use toruslife::{Render, RenderMode, TextRender, Universe};

/// Redraws every frame in place at the top of the terminal
pub struct ConsoleRender {
    inner: TextRender<io::Stdout>,
}
impl ConsoleRender {
    pub fn new(mode: RenderMode) -> io::Result<Self> {
        execute!(io::stdout(), cursor::Hide)?;
        Ok(Self {
            inner: TextRender::new(io::stdout(), mode),
        })
    }
}
impl Render for ConsoleRender {
    fn render(&mut self, universe: &Universe) -> io::Result<()> {
        let stdout = self.inner.sink_mut();
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.inner.render(universe)
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), cursor::Show) {
            log::error!("failed to show the cursor again: {}", err);
        }
    }
}
