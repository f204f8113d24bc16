use devkit::{record, Bindable, Field, Record};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl User {
    pub fn new(id: u64, name: &str, email: &str, age: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    pub fn to_record(&self) -> Record {
        record([
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("age", self.age.to_string()),
        ])
    }
}

// `id` is assigned by the store, never bound.
impl Bindable for User {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |u: &mut User, v| u.name = v).required(),
            Field::text("Email", |u: &mut User, v| u.email = v).required(),
            Field::integer("Age", |u: &mut User, v| u.age = v).required(),
        ]
    }
}

/// Arguments of `captcha verify`.
#[derive(Debug, Default)]
pub struct VerifyForm {
    pub token: String,
    pub ip: String,
}

impl Bindable for VerifyForm {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Token", |f: &mut VerifyForm, v| f.token = v).required(),
            Field::text("Ip", |f: &mut VerifyForm, v| f.ip = v).required(),
        ]
    }
}
