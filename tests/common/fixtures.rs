//! Test fixtures - reusable fragment content.

#![allow(dead_code)]

/// A hosted web service dialed by employees
pub const WEB_SERVICE: &str = r##"ziti_deployment:
  services:
    - name: web
      host:
        address: 10.0.0.5
        port: 8080
      policies:
        dial:
          roles: [employees]
"##;

/// A database service with an intercept and an explicit router policy
pub const DB_SERVICE: &str = r##"ziti_deployment:
  services:
    - name: db
      role_attributes: ["#databases"]
      intercept:
        address: db.ziti
        port: 5432
      policies:
        bind:
          identity: db-host
        router:
          roles: [west]
"##;

/// Same database service with a changed port
pub const DB_SERVICE_V2: &str = r##"ziti_deployment:
  services:
    - name: db
      role_attributes: ["#databases"]
      intercept:
        address: db.ziti
        port: 5433
      policies:
        bind:
          identity: db-host
        router:
          roles: [west]
"##;

/// Two identities in one fragment
pub const PEOPLE: &str = r##"ziti_deployment:
  identities:
    - name: alice
      role_attributes: ["#employees"]
    - name: db-host
      type: Router
"##;

/// A fragment whose service has no name
pub const NAMELESS_SERVICE: &str = r##"services:
  - host:
      address: 10.0.0.9
"##;

pub const WEB_PATH: &str = "deployments/services/web.yml";
pub const DB_PATH: &str = "deployments/services/db.yml";
pub const PEOPLE_PATH: &str = "deployments/identities/people.yml";
