pub const QUERY_INSERT_USER_APP: &str = r#"
INSERT INTO user_app(
    id,username,email,phone,password_hash,full_name,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8);
"#;

pub const QUERY_GET_USER_APP_BY_ID: &str = r#"
SELECT
    id,username,email,phone,password_hash,full_name,created_at,updated_at
FROM user_app
WHERE id=$1;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    id,user_app_id,pet_name,species,breed,
    age,weight,gender,pic,is_available_for_breeding,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,
    $6,$7,$8,$9,$10,
    $11,$12
);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet
    SET pet_name = $3,
    species = $4,
    breed = $5,
    age = $6,
    weight = $7,
    gender = $8,
    pic = $9,
    is_available_for_breeding = $10,
    updated_at = $11
WHERE id = $1 AND user_app_id = $2;
"#;

pub const QUERY_SET_PET_BREEDING_AVAILABILITY: &str = r#"
UPDATE pet
    SET is_available_for_breeding = $3,
    updated_at = $4
WHERE id = $1 AND user_app_id = $2;
"#;

pub const QUERY_DELETE_PET_MEDICAL_RECORDS: &str = r#"DELETE FROM medical_record WHERE pet_id=$1;"#;

pub const QUERY_DELETE_PET_BREEDING_REQUESTS: &str = r#"
DELETE FROM breeding_request WHERE requester_pet_id=$1 OR requested_pet_id=$1;
"#;

pub const QUERY_DELETE_PET_MATCHES: &str = r#"
DELETE FROM pet_match WHERE pet1_id=$1 OR pet2_id=$1;
"#;

pub const QUERY_DELETE_PET: &str = r#"DELETE FROM pet WHERE id=$1 AND user_app_id=$2;"#;

pub const QUERY_IS_PET_OWNED_BY: &str = r#"
SELECT COUNT(1) FROM pet WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    p.id,p.user_app_id,p.pet_name,p.species,p.breed,
    p.age,p.weight,p.gender,p.pic,p.is_available_for_breeding,
    p.created_at,p.updated_at
FROM pet AS p
WHERE p.id = $1;
"#;

pub const QUERY_GET_ALL_PETS_USER_ID: &str = r#"
SELECT
    p.id,p.user_app_id,p.pet_name,p.species,p.breed,
    p.age,p.weight,p.gender,p.pic,p.is_available_for_breeding,
    p.created_at,p.updated_at
FROM pet AS p
WHERE p.user_app_id = $1
ORDER BY p.created_at DESC;
"#;

/// Prefix for [sqlx::QueryBuilder], the caller appends the `(...)` id list
pub const QUERY_GET_PETS_BY_IDS_PREFIX: &str = r#"
SELECT
    p.id,p.user_app_id,p.pet_name,p.species,p.breed,
    p.age,p.weight,p.gender,p.pic,p.is_available_for_breeding,
    p.created_at,p.updated_at
FROM pet AS p
WHERE p.id IN "#;

pub const QUERY_GET_BREEDING_CANDIDATES: &str = r#"
SELECT
    p.id,p.user_app_id,p.pet_name,p.species,p.breed,
    p.age,p.weight,p.gender,p.pic,p.is_available_for_breeding,
    p.created_at,p.updated_at
FROM pet AS p
WHERE
    p.is_available_for_breeding = 1
    AND p.user_app_id <> $1
ORDER BY p.created_at DESC;
"#;

pub const QUERY_INSERT_MEDICAL_RECORD: &str = r#"
INSERT INTO medical_record(id,pet_id,pic,description,created_at) VALUES($1,$2,$3,$4,$5);
"#;

pub const QUERY_GET_PET_MEDICAL_RECORDS: &str = r#"
SELECT id,pet_id,pic,description,created_at
FROM medical_record
WHERE pet_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_DELETE_MEDICAL_RECORD: &str = r#"
DELETE FROM medical_record WHERE id=$1 AND pet_id=$2;
"#;

pub const QUERY_INSERT_BREEDING_REQUEST: &str = r#"
INSERT INTO breeding_request(
    id,requester_pet_id,requested_pet_id,status,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_GET_BREEDING_REQUEST: &str = r#"
SELECT id,requester_pet_id,requested_pet_id,status,created_at,updated_at
FROM breeding_request
WHERE id=$1;
"#;

pub const QUERY_HAS_PENDING_BREEDING_REQUEST: &str = r#"
SELECT COUNT(1)
FROM breeding_request
WHERE
    status = 'pending'
    AND (
        (requester_pet_id = $1 AND requested_pet_id = $2)
        OR (requester_pet_id = $2 AND requested_pet_id = $1)
    );
"#;

pub const QUERY_ARE_PETS_MATCHED: &str = r#"
SELECT COUNT(1)
FROM pet_match
WHERE (pet1_id = $1 AND pet2_id = $2) OR (pet1_id = $2 AND pet2_id = $1);
"#;

pub const QUERY_GET_USER_BREEDING_REQUESTS: &str = r#"
SELECT br.id,br.requester_pet_id,br.requested_pet_id,br.status,br.created_at,br.updated_at
FROM breeding_request AS br
WHERE
    br.requester_pet_id IN (SELECT id FROM pet WHERE user_app_id = $1)
    OR br.requested_pet_id IN (SELECT id FROM pet WHERE user_app_id = $1)
ORDER BY br.created_at DESC;
"#;

/// Compare-and-swap on the status, only a pending request can be resolved
pub const QUERY_RESOLVE_PENDING_BREEDING_REQUEST: &str = r#"
UPDATE breeding_request
    SET status = $2,
    updated_at = $3
WHERE id = $1 AND status = 'pending'
RETURNING id,requester_pet_id,requested_pet_id,status,created_at,updated_at;
"#;

pub const QUERY_GET_PET_OWNER_ID: &str = r#"SELECT user_app_id FROM pet WHERE id=$1;"#;

pub const QUERY_INSERT_PET_MATCH: &str = r#"
INSERT INTO pet_match(
    id,pet1_id,pet2_id,user_of_pet1_id,user_of_pet2_id,created_at
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_DELETE_BREEDING_REQUEST: &str = r#"DELETE FROM breeding_request WHERE id=$1;"#;

pub const QUERY_GET_USER_MATCHES: &str = r#"
SELECT id,pet1_id,pet2_id,user_of_pet1_id,user_of_pet2_id,created_at
FROM pet_match
WHERE user_of_pet1_id = $1 OR user_of_pet2_id = $1
ORDER BY created_at DESC;
"#;
