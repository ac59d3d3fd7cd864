use crate::{
    credential::{hash_password, CredentialRng},
    error::AppError,
    model::User,
};

// Fixed account present from startup. Its hash was never produced by
// `hash_password`, so it can only act through its token.
pub const SEED_USER: &str = "admin";
pub const SEED_TOKEN: &str = "faketoken";
const SEED_PASSWORD_HASH: &str = "unhashedpassword";
const SEED_SALT: &str = "nosalt";

pub struct UserStore {
    users: Vec<User>,
    rng: CredentialRng,
}

impl UserStore {
    // Store seeded with the admin account
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.users.push(User {
            name: SEED_USER.to_string(),
            idtoken: SEED_TOKEN.to_string(),
            password_hash: SEED_PASSWORD_HASH.to_string(),
            salt: SEED_SALT.to_string(),
        });
        store
    }

    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            rng: CredentialRng::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|user| user.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.name == name)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Registers a new account and returns its first token.
    pub fn create(&mut self, name: &str, password: &str) -> Result<String, AppError> {
        if name.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest("username and password are required"));
        }
        if self.find(name).is_some() {
            return Err(AppError::Conflict(name.to_string()));
        }

        let idtoken = self.rng.token()?;
        let salt = self.rng.salt()?;
        let password_hash = hash_password(password, &salt);
        self.users.push(User {
            name: name.to_string(),
            idtoken: idtoken.clone(),
            password_hash,
            salt,
        });
        Ok(idtoken)
    }

    /// Checks the password and rotates the user's token.
    pub fn login(&mut self, name: &str, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::BadRequest("password is required"));
        }
        let idtoken = self.rng.token()?;
        let user = self
            .find_mut(name)
            .ok_or(AppError::Forbidden("unknown user"))?;
        if hash_password(password, &user.salt) != user.password_hash {
            return Err(AppError::Forbidden("wrong password"));
        }
        user.idtoken = idtoken.clone();
        Ok(idtoken)
    }

    // Plain string comparison, not constant time.
    pub fn verify(&self, name: &str, idtoken: &str) -> bool {
        self.find(name)
            .map(|user| user.idtoken == idtoken)
            .unwrap_or(false)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
