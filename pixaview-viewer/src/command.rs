use pixaview_core::model::ImageSlot;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: behaves like typing into the search field.
    Text(String),
    /// `:search <text>` submits immediately.
    Search(String),
    /// `:more` asks for the next page.
    More,
    /// `:open <n> [themed]` previews result `n`.
    Open { index: usize, slot: ImageSlot },
    /// `:switch` toggles the open preview between regular and themed.
    Switch,
    /// `:purge` drops every cached image.
    Purge,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Text(line.to_string()));
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default();
        match name {
            "search" | "s" => {
                let text = rest
                    .trim_start()
                    .strip_prefix(name)
                    .unwrap_or_default()
                    .trim();
                Ok(Command::Search(text.to_string()))
            }
            "more" | "m" => Ok(Command::More),
            "open" | "o" => {
                let index = words
                    .next()
                    .ok_or_else(|| "usage: :open <n> [themed]".to_string())?
                    .parse::<usize>()
                    .map_err(|e| format!("invalid index: {e}"))?;
                let slot = match words.next() {
                    None => ImageSlot::Primary,
                    Some("themed" | "t") => ImageSlot::Themed,
                    Some(other) => return Err(format!("unknown slot '{other}'")),
                };
                Ok(Command::Open { index, slot })
            }
            "switch" => Ok(Command::Switch),
            "purge" => Ok(Command::Purge),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command ':{other}'")),
        }
    }
}

pub const HELP: &str = "\
  <text>              search as you type (debounced)
  :search <text>      search immediately
  :more               load the next page
  :open <n> [themed]  preview result n
  :switch             toggle the preview between regular and themed
  :purge              clear the image cache
  :quit               exit";
