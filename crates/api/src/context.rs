use keystone_core::UserId;

/// Verified token subject for a request.
///
/// Carries only the subject id. Anything else (role, email) must be resolved
/// from the identity service by the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectContext {
    subject: UserId,
}

impl SubjectContext {
    pub fn new(subject: UserId) -> Self {
        Self { subject }
    }

    pub fn subject(&self) -> &UserId {
        &self.subject
    }
}
