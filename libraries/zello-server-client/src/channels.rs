//! Channel and channel role commands.

use crate::classify::ApiResponse;
use crate::client::ZelloClient;
use crate::error::{Result, ZelloClientError};
use crate::request::{CommandPath, HttpMethod, Params};
use crate::types::{ChannelFilter, RoleSettings};
use tracing::debug;

impl ZelloClient {
    /// List channels, or fetch details of one channel when `filter.name` is set.
    pub async fn get_channels(&self, filter: &ChannelFilter) -> Result<ApiResponse> {
        let command = CommandPath::new("channel/get")
            .opt_arg("name", filter.name.as_deref())
            .opt_arg("max", filter.max)
            .opt_arg("start", filter.start);

        self.call(command.as_str(), HttpMethod::Get, &Params::new())
            .await
    }

    /// Add a channel.
    ///
    /// `is_group` selects a group channel over a dynamic one; `is_hidden`
    /// together with `is_group` creates a hidden group channel. `None` leaves
    /// the choice to the server.
    pub async fn add_channel(
        &self,
        name: &str,
        is_group: Option<bool>,
        is_hidden: Option<bool>,
    ) -> Result<ApiResponse> {
        debug!(name = %name, "Adding channel");

        let command = CommandPath::new("channel/add")
            .arg("name", name)
            .opt_arg("shared", is_group)
            .opt_arg("invisible", is_hidden);

        self.call(command.as_str(), HttpMethod::Get, &Params::new())
            .await
    }

    /// Delete channels by name.
    pub async fn delete_channels<S: AsRef<str>>(&self, names: &[S]) -> Result<ApiResponse> {
        let mut params = Params::new();
        params.push_list("name", names.iter().map(|n| n.as_ref()));

        self.call("channel/delete", HttpMethod::Post, &params).await
    }

    /// List the roles defined in a channel.
    pub async fn get_channel_roles(&self, channel: &str) -> Result<ApiResponse> {
        let command = CommandPath::new("channel/roleslist").arg("name", channel);
        self.call(command.as_str(), HttpMethod::Get, &Params::new())
            .await
    }

    /// Add or update a channel role.
    pub async fn save_channel_role(
        &self,
        channel: &str,
        role: &str,
        settings: &RoleSettings,
    ) -> Result<ApiResponse> {
        let command = CommandPath::new("channel/saverole")
            .arg("channel", channel)
            .arg("name", role);

        let mut params = Params::new();
        params
            .push_json("settings", settings)
            .map_err(|e| ZelloClientError::Encode(format!("role settings: {}", e)))?;

        self.call(command.as_str(), HttpMethod::Post, &params).await
    }

    /// Delete roles from a channel.
    pub async fn delete_channel_roles<S: AsRef<str>>(
        &self,
        channel: &str,
        roles: &[S],
    ) -> Result<ApiResponse> {
        let command = CommandPath::new("channel/deleterole").arg("channel", channel);
        let mut params = Params::new();
        params.push_list("roles", roles.iter().map(|r| r.as_ref()));

        self.call(command.as_str(), HttpMethod::Post, &params).await
    }

    /// Assign users to a role in a channel.
    pub async fn add_to_channel_role<S: AsRef<str>>(
        &self,
        channel: &str,
        role: &str,
        users: &[S],
    ) -> Result<ApiResponse> {
        let command = CommandPath::new("channel/addtorole")
            .arg("channel", channel)
            .arg("name", role);
        let mut params = Params::new();
        params.push_list("login", users.iter().map(|u| u.as_ref()));

        self.call(command.as_str(), HttpMethod::Post, &params).await
    }
}
