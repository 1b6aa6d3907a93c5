//! The Kazoo resource table.
//!
//! Every entry becomes a lazily built [`RestResource`](crate::rest::RestResource) static and a set of
//! methods on [`KazooClient`](crate::KazooClient):
//!
//! ```text
//! GET    /accounts/{account_id}/users            -> client.get_users(account_id)
//! GET    /accounts/{account_id}/users/{user_id}  -> client.get_user(account_id, user_id)
//! PUT    /accounts/{account_id}/users            -> client.create_user(account_id, data)
//! POST   /accounts/{account_id}/users/{user_id}  -> client.update_user(account_id, user_id, data)
//! DELETE /accounts/{account_id}/users/{user_id}  -> client.delete_user(account_id, user_id)
//! GET    /accounts/{account_id}/users/hotdesks   -> client.get_hotdesk(account_id)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//!
//! let callflows = client.get_callflows("acc1").await?;
//! let created = client
//!     .create_callflow("acc1", json!({"numbers": ["1000"], "flow": {"module": "user"}}))
//!     .await?;
//! client.get_deployment("acc1", "srv1").await?;
//! ```

use crate::clients::HttpMethod;
use crate::rest::macros::rest_resources;
use crate::rest::{ExtraView, ResourceOperation, ViewScope};

rest_resources! {
    /// Accounts, with their children and descendants.
    ACCOUNTS = ("account", "/accounts/{account_id}")
        .extra_view(ExtraView::new("get_account_children", "children").scope(ViewScope::Object))
        .extra_view(ExtraView::new("get_account_descendants", "descendants").scope(ViewScope::Object))
    {
        args: [], object: account_id;
        list get_accounts;
        detail get_account;
        create create_account;
        update update_account;
        delete delete_account;
        view get_account_children(object);
        view get_account_descendants(object);
    }

    /// Callflows.
    CALLFLOWS = ("callflow", "/accounts/{account_id}/callflows/{callflow_id}") {
        args: [account_id], object: callflow_id;
        list get_callflows;
        detail get_callflow;
        create create_callflow;
        update update_callflow;
        delete delete_callflow;
    }

    /// Conferences.
    CONFERENCES = ("conference", "/accounts/{account_id}/conferences/{conference_id}") {
        args: [account_id], object: conference_id;
        list get_conferences;
        detail get_conference;
        create create_conference;
        update update_conference;
        delete delete_conference;
    }

    /// Devices, with the registration status of all of them.
    DEVICES = ("device", "/accounts/{account_id}/devices/{device_id}")
        .extra_view(ExtraView::new("get_all_devices_status", "status"))
    {
        args: [account_id], object: device_id;
        list get_devices;
        detail get_device;
        create create_device;
        update update_device;
        delete delete_device;
        view get_all_devices_status;
    }

    /// Directories.
    DIRECTORIES = ("directory", "/accounts/{account_id}/directories/{directory_id}")
        .plural_name("directories")
    {
        args: [account_id], object: directory_id;
        list get_directories;
        detail get_directory;
        create create_directory;
        update update_directory;
        delete delete_directory;
    }

    /// Groups.
    GROUPS = ("group", "/accounts/{account_id}/groups/{group_id}") {
        args: [account_id], object: group_id;
        list get_groups;
        detail get_group;
        create create_group;
        update update_group;
        delete delete_group;
    }

    /// Account limits. Kazoo exposes them as a single document, so only list is generated.
    LIMITS = ("limit", "/accounts/{account_id}/limits/{ignored}")
        .operations(&[ResourceOperation::List])
    {
        args: [account_id], object: ignored;
        list get_limits;
    }

    /// Media documents. Uploading the audio itself is [`KazooClient::upload_media_file`](crate::KazooClient::upload_media_file).
    MEDIA = ("media", "/accounts/{account_id}/media/{media_id}")
        .plural_name("media")
        .method_name(ResourceOperation::List, "get_all_media")
    {
        args: [account_id], object: media_id;
        list get_all_media;
        detail get_media;
        create create_media;
        update update_media;
        delete delete_media;
    }

    /// IVR menus.
    MENUS = ("menu", "/accounts/{account_id}/menus/{menu_id}") {
        args: [account_id], object: menu_id;
        list get_menus;
        detail get_menu;
        create create_menu;
        update update_menu;
        delete delete_menu;
    }

    /// Phone numbers. Creating and fetching one are hand-written client methods.
    PHONE_NUMBERS = ("phone_number", "/accounts/{account_id}/phone_numbers/{phone_number}")
        .operations(&[ResourceOperation::List, ResourceOperation::Update, ResourceOperation::Delete])
        .extra_view(ExtraView::new("activate_phone_number", "activate").scope(ViewScope::Object).method(HttpMethod::Put))
        .extra_view(ExtraView::new("reserve_phone_number", "reserve").scope(ViewScope::Object).method(HttpMethod::Put))
        .extra_view(ExtraView::new("add_port_in_number", "port").scope(ViewScope::Object).method(HttpMethod::Put))
    {
        args: [account_id], object: phone_number;
        list get_phone_numbers;
        update update_phone_number;
        delete delete_phone_number;
        view activate_phone_number(object, data);
        view reserve_phone_number(object, data);
        view add_port_in_number(object, data);
    }

    /// Call queues.
    QUEUES = ("queue", "/accounts/{account_id}/queues/{queue_id}") {
        args: [account_id], object: queue_id;
        list get_queues;
        detail get_queue;
        create create_queue;
        update update_queue;
        delete delete_queue;
    }

    /// Rates. Uploading a whole rate deck is [`KazooClient::upload_ratedeck`](crate::KazooClient::upload_ratedeck).
    RATES = ("rate", "/accounts/{account_id}/rates/{rate_id}") {
        args: [account_id], object: rate_id;
        list get_rates;
        detail get_rate;
        create create_rate;
        update update_rate;
        delete delete_rate;
    }

    /// The app store.
    APPS = ("app", "/accounts/{account_id}/apps_store/{app_id}") {
        args: [account_id], object: app_id;
        list get_apps;
        detail get_app;
        create create_app;
        update update_app;
        delete delete_app;
    }

    /// System-wide carrier resources.
    GLOBAL_RESOURCES = ("global_resource", "/resources/{resource_id}") {
        args: [], object: resource_id;
        list get_global_resources;
        detail get_global_resource;
        create create_global_resource;
        update update_global_resource;
        delete delete_global_resource;
    }

    /// Account carrier resources.
    LOCAL_RESOURCES = ("local_resource", "/accounts/{account_id}/resources/{resource_id}") {
        args: [account_id], object: resource_id;
        list get_local_resources;
        detail get_local_resource;
        create create_local_resource;
        update update_local_resource;
        delete delete_local_resource;
    }

    /// Provisioned servers, their deployments and logs.
    SERVERS = ("server", "/accounts/{account_id}/servers/{server_id}")
        .operations(&[ResourceOperation::List])
        .extra_view(ExtraView::new("get_deployment", "deployment").scope(ViewScope::Object))
        .extra_view(ExtraView::new("create_deployment", "deployment").scope(ViewScope::Object).method(HttpMethod::Put))
        .extra_view(ExtraView::new("get_server_log", "log"))
    {
        args: [account_id], object: server_id;
        list get_servers;
        view get_deployment(object);
        view create_deployment(object, data);
        view get_server_log;
    }

    /// Service plans.
    SERVICE_PLANS = ("service_plan", "/accounts/{account_id}/service_plans/{service_plan_id}") {
        args: [account_id], object: service_plan_id;
        list get_service_plans;
        detail get_service_plan;
        create create_service_plan;
        update update_service_plan;
        delete delete_service_plan;
    }

    /// System configuration documents. Their key order is significant.
    SYSTEM_CONFIGS = ("system_config", "/system_configs/{system_config_id}") {
        args: [], object: system_config_id;
        list get_system_configs;
        detail get_system_config;
        create create_system_config;
        update update_system_config;
        delete delete_system_config;
    }

    /// Temporal (time of day) rules.
    TEMPORAL_RULES = ("temporal_rule", "/accounts/{account_id}/temporal_rules/{rule_id}") {
        args: [account_id], object: rule_id;
        list get_temporal_rules;
        detail get_temporal_rule;
        create create_temporal_rule;
        update update_temporal_rule;
        delete delete_temporal_rule;
    }

    /// Users, with the account's hotdesk assignments.
    USERS = ("user", "/accounts/{account_id}/users/{user_id}")
        .extra_view(ExtraView::new("get_hotdesk", "hotdesks"))
    {
        args: [account_id], object: user_id;
        list get_users;
        detail get_user;
        create create_user;
        update update_user;
        delete delete_user;
        view get_hotdesk;
    }

    /// Voicemail boxes.
    VOICEMAIL_BOXES = ("voicemail_box", "/accounts/{account_id}/vmboxes/{vmbox_id}")
        .plural_name("voicemail_boxes")
    {
        args: [account_id], object: vmbox_id;
        list get_voicemail_boxes;
        detail get_voicemail_box;
        create create_voicemail_box;
        update update_voicemail_box;
        delete delete_voicemail_box;
    }

    /// Documents attached to a phone number (port requests, LOAs).
    PHONE_NUMBER_DOCS = ("phone_number_doc", "/accounts/{account_id}/phone_numbers/{phone_number}/docs/{filename}")
        .operations(&[ResourceOperation::Delete])
    {
        args: [account_id, phone_number], object: filename;
        delete delete_phone_number_doc;
    }

    /// Webhooks.
    WEBHOOKS = ("webhook", "/accounts/{account_id}/webhooks/{webhook_id}") {
        args: [account_id], object: webhook_id;
        list get_webhooks;
        detail get_webhook;
        create create_webhook;
        update update_webhook;
        delete delete_webhook;
    }
}
