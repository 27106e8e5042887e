use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Allocate an id and create a user
    CreateUser {
        /// Display name
        name: String,
    },
    /// Get a user by id
    GetUser {
        /// User id
        id: u64,
    },
    /// Get the user bound to a Google email, creating it on first sight
    GoogleUser {
        /// Verified Google email
        email: String,
        /// Display name, used only when the user is created
        name: String,
    },
}
