use std::path::PathBuf;

/// Terminal failures of a run. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to call `{url}`")]
    Network {
        url: String,

        #[source]
        source: Box<ureq::Error>,
    },

    #[error("malformed response from `{url}`")]
    MalformedResponse {
        url: String,

        #[source]
        source: serde_json::Error,
    },

    #[error("failed to access the calendar file `{}`", path.display())]
    FileIo {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn network(url: impl Into<String>, source: ureq::Error) -> Self {
        Self::Network { url: url.into(), source: Box::new(source) }
    }

    pub fn malformed_response(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::MalformedResponse { url: url.into(), source }
    }

    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo { path: path.into(), source }
    }
}
