//! User management commands.

use crate::classify::ApiResponse;
use crate::client::ZelloClient;
use crate::error::Result;
use crate::request::{CommandPath, HttpMethod, Params};
use crate::types::{UserDetails, UserFilter};
use tracing::debug;

impl ZelloClient {
    /// List users, or fetch details of one user when `filter.login` is set.
    pub async fn get_users(&self, filter: &UserFilter) -> Result<ApiResponse> {
        let mut command = CommandPath::new("user/get")
            .opt_arg("login", filter.login.as_deref())
            .opt_arg("channel", filter.channel.as_deref());
        if filter.gateway {
            command = command.arg("gateway", 1);
        }
        let command = command
            .opt_arg("max", filter.max)
            .opt_arg("start", filter.start);

        self.call(command.as_str(), HttpMethod::Get, &Params::new())
            .await
    }

    /// Add or update a user.
    pub async fn save_user(&self, user: &UserDetails) -> Result<ApiResponse> {
        debug!(name = %user.name, "Saving user");
        self.call("user/save", HttpMethod::Post, &user.params()).await
    }

    /// Delete users by username.
    pub async fn delete_users<S: AsRef<str>>(&self, users: &[S]) -> Result<ApiResponse> {
        let mut params = Params::new();
        params.push_list("login", users.iter().map(|u| u.as_ref()));

        self.call("user/delete", HttpMethod::Post, &params).await
    }

    /// Add users to a channel.
    pub async fn add_to_channel<S: AsRef<str>>(
        &self,
        channel: &str,
        users: &[S],
    ) -> Result<ApiResponse> {
        let command = CommandPath::new("user/addto").value(channel);
        let mut params = Params::new();
        params.push_list("login", users.iter().map(|u| u.as_ref()));

        self.call(command.as_str(), HttpMethod::Post, &params).await
    }

    /// Add users to several channels at once.
    pub async fn add_to_channels<C: AsRef<str>, S: AsRef<str>>(
        &self,
        channels: &[C],
        users: &[S],
    ) -> Result<ApiResponse> {
        let params = users_and_channels(channels, users);
        self.call("user/addtochannels", HttpMethod::Post, &params)
            .await
    }

    /// Remove users from a channel.
    pub async fn remove_from_channel<S: AsRef<str>>(
        &self,
        channel: &str,
        users: &[S],
    ) -> Result<ApiResponse> {
        let command = CommandPath::new("user/removefrom").value(channel);
        let mut params = Params::new();
        params.push_list("login", users.iter().map(|u| u.as_ref()));

        self.call(command.as_str(), HttpMethod::Post, &params).await
    }

    /// Remove users from several channels at once.
    pub async fn remove_from_channels<C: AsRef<str>, S: AsRef<str>>(
        &self,
        channels: &[C],
        users: &[S],
    ) -> Result<ApiResponse> {
        let params = users_and_channels(channels, users);
        self.call("user/removefromchannels", HttpMethod::Post, &params)
            .await
    }
}

fn users_and_channels<C: AsRef<str>, S: AsRef<str>>(channels: &[C], users: &[S]) -> Params {
    let mut params = Params::new();
    params
        .push_list("users", users.iter().map(|u| u.as_ref()))
        .push_list("channels", channels.iter().map(|c| c.as_ref()));
    params
}
