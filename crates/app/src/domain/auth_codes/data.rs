//! Send code payload.

use validator::Validate;

use crate::{
    domain::auth_codes::models::Contact,
    validation::{self, FieldErrors},
};

#[derive(Debug, Clone, Default, Validate)]
pub struct SendCode {
    #[validate(email(code = "email", message = "должно быть адресом электронной почты"))]
    pub email: Option<String>,

    pub phone: Option<String>,
}

impl TryFrom<SendCode> for Contact {
    type Error = FieldErrors;

    fn try_from(data: SendCode) -> Result<Self, Self::Error> {
        let email = data.email.filter(|email| !email.is_empty());
        let phone = data.phone.filter(|phone| !phone.is_empty());

        let data = SendCode { email, phone };
        validation::check(&data)?;

        match data {
            SendCode {
                email: Some(email), ..
            } => Ok(Self::Email(email)),
            SendCode {
                phone: Some(phone), ..
            } => Ok(Self::Phone(phone)),
            SendCode { .. } => Err(FieldErrors::single(
                "email",
                "Поле email или phone обязательно для заполнения",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_wins_over_phone() {
        let contact = Contact::try_from(SendCode {
            email: Some("buyer@example.com".to_owned()),
            phone: Some("+79990000000".to_owned()),
        });

        assert_eq!(
            contact.ok(),
            Some(Contact::Email("buyer@example.com".to_owned()))
        );
    }

    #[test]
    fn empty_email_falls_back_to_phone() {
        let contact = Contact::try_from(SendCode {
            email: Some(String::new()),
            phone: Some("+79990000000".to_owned()),
        });

        assert_eq!(contact.ok(), Some(Contact::Phone("+79990000000".to_owned())));
    }

    #[test]
    fn neither_contact_is_rejected() {
        let errors = Contact::try_from(SendCode::default())
            .err()
            .unwrap_or_default();

        assert_eq!(
            errors.get("email"),
            Some("Поле email или phone обязательно для заполнения")
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = Contact::try_from(SendCode {
            email: Some("not-an-email".to_owned()),
            phone: None,
        })
        .err()
        .unwrap_or_default();

        assert_eq!(
            errors.get("email"),
            Some("Поле email должно быть адресом электронной почты")
        );
    }
}
