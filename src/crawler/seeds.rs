//! Seed loading
//!
//! Seeds come from the command line, or one per line from a reader (stdin)
//! until end of input. A stdin line is not taken verbatim: surrounding
//! whitespace is trimmed and blank lines are skipped rather than crawled as
//! empty seeds. Command-line arguments are crawled exactly as written.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

type BoxedReader = Box<dyn AsyncRead + Unpin + Send>;

/// Where the initial tasks come from
pub enum SeedSource {
    /// URLs given up front
    List(std::vec::IntoIter<String>),
    /// Newline-delimited URLs read until EOF
    Lines(Lines<BufReader<BoxedReader>>),
}

impl SeedSource {
    /// Seeds from positional arguments
    pub fn from_args(urls: Vec<String>) -> Self {
        Self::List(urls.into_iter())
    }

    /// Seeds read line by line from `reader`
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let reader: BoxedReader = Box::new(reader);
        Self::Lines(BufReader::new(reader).lines())
    }

    /// Positional arguments when there are any, stdin otherwise
    pub fn args_or_stdin(urls: Vec<String>) -> Self {
        if urls.is_empty() {
            Self::from_reader(tokio::io::stdin())
        } else {
            Self::from_args(urls)
        }
    }

    /// Returns the next seed, or `None` once the source is exhausted
    pub async fn next_seed(&mut self) -> std::io::Result<Option<String>> {
        match self {
            Self::List(urls) => Ok(urls.next()),
            Self::Lines(lines) => {
                while let Some(line) = lines.next_line().await? {
                    let line = line.trim();
                    if !line.is_empty() {
                        return Ok(Some(line.to_string()));
                    }
                }
                Ok(None)
            }
        }
    }
}
