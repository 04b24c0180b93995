//! Users CRUD operations: route, input contract and responses per status.

use crate::extractors::ID_PARAM;
use crate::handlers::users;
use crate::model::{NewUser, User, UserPatch};
use crate::openapi::{ApiRegistry, OperationSpec};
use crate::response::{ErrorBody, MessageBody, ValidationErrorBody};
use crate::state::AppState;

const TAG: &str = "Users";

pub fn register(registry: ApiRegistry<AppState>) -> ApiRegistry<AppState> {
    registry
        .operation(
            OperationSpec::get("/users", "listUsers")
                .summary("List users")
                .tag(TAG)
                .json_array_response::<User>(200, "User list"),
            users::list,
        )
        .operation(
            OperationSpec::post("/users", "createUser")
                .summary("Create a user")
                .tag(TAG)
                .json_request::<NewUser>("User to create")
                .json_response::<User>(200, "The created user")
                .json_response::<ValidationErrorBody>(422, "The validation error(s)")
                .json_response::<ErrorBody>(409, "Email already in use"),
            users::create,
        )
        .operation(
            OperationSpec::get("/users/{id}", "getUser")
                .summary("Get one user")
                .tag(TAG)
                .integer_path_param(ID_PARAM, "User id")
                .json_response::<User>(200, "The requested user")
                .json_response::<MessageBody>(404, "User not found")
                .json_response::<ValidationErrorBody>(422, "Invalid id error"),
            users::get_by_id,
        )
        .operation(
            OperationSpec::patch("/users/{id}", "updateUser")
                .summary("Update a user")
                .description("Applies only the supplied fields. A body naming none of them is rejected with `invalid_updates`.")
                .tag(TAG)
                .integer_path_param(ID_PARAM, "User id")
                .json_request::<UserPatch>("Fields to change")
                .json_response::<User>(200, "The updated user")
                .json_response::<MessageBody>(404, "User not found")
                .json_response::<ValidationErrorBody>(422, "The validation error(s)")
                .json_response::<ErrorBody>(409, "Email already in use"),
            users::update,
        )
        .operation(
            OperationSpec::delete("/users/{id}", "deleteUser")
                .summary("Delete a user")
                .tag(TAG)
                .integer_path_param(ID_PARAM, "User id")
                .empty_response(204, "User deleted")
                .json_response::<MessageBody>(404, "User not found")
                .json_response::<ValidationErrorBody>(422, "Invalid id error"),
            users::delete,
        )
}
