//! sfclient - management client for Service Fabric clusters
//!
//! Typed, asynchronous resource clients (applications, application types,
//! chaos, code packages, compose deployments, infrastructure, repair tasks,
//! service types and mesh resources) behind one aggregate
//! [`ServiceFabricClient`].
//!
//! Clients are obtained from a [`ServiceFabricClientBuilder`], which checks
//! the security configuration at compile time, or from a
//! [`ServiceFabricClientFactory`], which resolves a transport from the
//! endpoint scheme. Transports are looked up in a [`TransportRegistry`]; the
//! default registry carries the HTTP transport for `http` and `https`.
//!
//! # Module Structure
//!
//! - [`builder`] - fluent, typestate client builder
//! - [`factory`] - endpoint-driven client creation
//! - [`client`] - resource client traits and raw requests
//! - [`types`] - request and response models
//! - [`http`] - the HTTP transport
//! - [`transport`] - scheme to transport registry
//! - [`security`] - security settings and providers
//! - [`settings`] - settings shared by every transport
//! - [`endpoints`] - validated endpoint sets
//! - [`error`] - error types

pub mod builder;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod factory;
pub mod http;
pub mod security;
pub mod settings;
pub mod transport;
pub mod types;

pub use builder::ServiceFabricClientBuilder;
pub use client::{RawRequest, RawResponse, ServiceFabricClient};
pub use endpoints::Endpoints;
pub use error::{ConfigError, Error, Result};
pub use factory::{Resolution, ServiceFabricClientFactory};
pub use http::{describe_error, HttpServiceFabricClient};
pub use security::{
    security_provider, static_security, ClaimsSecuritySettings, SecurityConfig, SecurityKind,
    SecuritySettings, SecuritySettingsProvider, X509SecuritySettings,
};
pub use settings::ClientSettings;
pub use transport::{transport_factory, SharedClient, TransportContext, TransportRegistry};
