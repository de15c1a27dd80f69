use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name stored on the profile
        #[arg(long)]
        name: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Email a password-reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password using the link from the reset email
    ResetPassword {
        /// Full link from the email, including the #access_token fragment
        #[arg(long)]
        link: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// List journal entries, newest first
    List,

    /// Show one entry
    Show {
        /// Entry ID
        id: String,
    },

    /// Write a new entry
    New {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit an entry; omitted fields keep their current value
    Edit {
        /// Entry ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Entry date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

impl Commands {
    /// Entry commands only make sense with a signed-in identity.
    pub fn needs_identity(&self) -> bool {
        matches!(
            self,
            Self::List | Self::Show { .. } | Self::New { .. } | Self::Edit { .. } | Self::Delete { .. }
        )
    }
}
