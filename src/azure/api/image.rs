// SPDX-License-Identifier: MIT OR Apache-2.0

//! Disks, OS images and VM images.

use crate::azure::{Disk, DiskParams, OSImage, OSImageParams, VMImage};
use crate::client::{ApiClient, Call, Transport};
use crate::error::Result;
use crate::xml;

/// Virtual hard disks registered with the subscription.
#[derive(Debug)]
pub struct DiskApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> DiskApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<Disk>> {
        self.client
            .list_or_empty(&Call::get(&["services", "disks"]), xml::parse_list::<Disk>)
            .await
    }

    /// Register an uploaded VHD as a disk.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn add(&self, params: &DiskParams) -> Result<Disk> {
        let call = Call::post(&["services", "disks"]).with_xml(params.to_xml()?);
        self.client.fetch(&call, xml::parse::<Disk>).await
    }

    /// Delete a disk and its VHD blob. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault, for example a disk still
    /// attached to a role.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        let call = Call::delete(&["services", "disks", name]).with_query("comp", "media");
        self.client.accepted_or_none(&call).await
    }
}

/// OS images available to the subscription.
#[derive(Debug)]
pub struct OSImageApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> OSImageApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<OSImage>> {
        self.client
            .list_or_empty(&Call::get(&["services", "images"]), xml::parse_list::<OSImage>)
            .await
    }

    /// Register a generalized VHD as an OS image.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn add(&self, params: &OSImageParams) -> Result<OSImage> {
        let call = Call::post(&["services", "images"]).with_xml(params.to_xml()?);
        self.client.fetch(&call, xml::parse::<OSImage>).await
    }

    /// Delete a user image and its VHD blob. `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on a provider fault.
    pub async fn delete(&self, name: &str) -> Result<Option<String>> {
        let call = Call::delete(&["services", "images", name]).with_query("comp", "media");
        self.client.accepted_or_none(&call).await
    }
}

/// Captured VM images.
#[derive(Debug)]
pub struct VMImageApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> VMImageApi<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error on a provider fault or a malformed document.
    pub async fn list(&self) -> Result<Vec<VMImage>> {
        self.client
            .list_or_empty(&Call::get(&["services", "vmimages"]), xml::parse_list::<VMImage>)
            .await
    }
}
