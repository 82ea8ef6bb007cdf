// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle operations posted to a role instance.

use crate::error::Result;
use crate::xml::{xml_enum, XmlEnum, XmlPayload};

xml_enum! {
    /// What happens to the role once it is shut down.
    pub enum PostShutdownAction {
        Stopped => "Stopped",
        StoppedDeallocated => "StoppedDeallocated",
    }
}

xml_enum! {
    /// What happens to the role once it is captured.
    pub enum PostCaptureAction {
        Delete => "Delete",
        Reprovision => "Reprovision",
    }
}

/// Parameters of an OS image capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureParams {
    pub target_image_name: String,
    pub target_image_label: String,
    pub post_capture_action: PostCaptureAction,
}

impl CaptureParams {
    /// Capture into `image_name`, deleting the role afterwards.
    #[must_use]
    pub fn new(image_name: impl Into<String>, image_label: impl Into<String>) -> Self {
        Self {
            target_image_name: image_name.into(),
            target_image_label: image_label.into(),
            post_capture_action: PostCaptureAction::Delete,
        }
    }

    #[must_use]
    pub fn with_post_capture_action(mut self, action: PostCaptureAction) -> Self {
        self.post_capture_action = action;
        self
    }
}

/// An operation posted to `.../roleinstances/{role}/Operations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleOperation {
    Start,
    Shutdown(PostShutdownAction),
    Restart,
    Capture(CaptureParams),
}

impl RoleOperation {
    /// Element and `OperationType` name of the operation.
    #[must_use]
    pub fn operation_type(&self) -> &'static str {
        match self {
            RoleOperation::Start => "StartRoleOperation",
            RoleOperation::Shutdown(_) => "ShutdownRoleOperation",
            RoleOperation::Restart => "RestartRoleOperation",
            RoleOperation::Capture(_) => "CaptureRoleOperation",
        }
    }

    /// Render the operation payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be written.
    pub fn to_xml(&self) -> Result<String> {
        let operation_type = self.operation_type();
        let mut payload = XmlPayload::new(operation_type)?;
        payload.element("OperationType", operation_type)?;
        match self {
            RoleOperation::Start | RoleOperation::Restart => {}
            RoleOperation::Shutdown(action) => {
                payload.element("PostShutdownAction", action.as_str())?;
            }
            RoleOperation::Capture(params) => {
                payload
                    .element("PostCaptureAction", params.post_capture_action.as_str())?
                    .element("TargetImageLabel", &params.target_image_label)?
                    .element("TargetImageName", &params.target_image_name)?;
            }
        }
        payload.finish()
    }
}
