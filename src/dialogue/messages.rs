//! User-facing reply texts

pub const MODEL_TEST_CASE_INTRO: &str = "Ok, let's model a test case.";
pub const SELECT_PROJECT: &str =
    "Which project should the test case be added to? Please enter a number:";
pub const SELECT_MICROSERVICE: &str =
    "Which microservice should the test case be added to? Please enter a number:";
pub const ENTER_TEST_CASE_NAME: &str = "Please enter a name for the test case:";
pub const SELECT_OPERATION: &str =
    "We continue with the first request. Please select a method to test:";
pub const PATH_PARAMS_INFO: &str = "The path contains path parameters whose values must be set.";
pub const ENTER_REQUEST_METHOD: &str = "Please enter the request method (e.g., GET, POST,...):";
pub const ENTER_REQUEST_PATH: &str = "Please enter the request path (e.g., /mensa/Aachen/dishes):";
pub const INCLUDE_BODY_QUESTION: &str = "Do you want to include a JSON body to the request?";
pub const ENTER_BODY: &str = "Please enter the request body:";
pub const BODY_SET: &str = "Request body was set.";
pub const INCLUDE_ASSERTIONS_QUESTION: &str =
    "Do you want to include assertions on the response to this request?";
pub const SELECT_ASSERTION_TYPE: [&str; 3] = [
    "Which type of assertion should be added? Please enter a number:",
    "1. Assertion on the response status code (e.g., check that status code 200 is returned)",
    "2. Assertion on the response body (e.g., check that response contains field \"id\")",
];
pub const EXPECTED_STATUS_CODE_QUESTION: &str = "Which response status code do you expect?";
pub const ASSERTION_ADDED: &str = "Added assertion to the test.";
pub const ASSERTION_EXISTS: &str = "This assertion is already part of the test.";
pub const ASSERTION_OVERVIEW: &str = "Here is an overview of the current assertions:";
pub const ADD_ANOTHER_ASSERTION: &str = "Do you want to add another assertion?";
pub const SELECT_BODY_ASSERTION_TYPE: [&str; 7] = [
    "What is the assertion supposed to check?",
    "1. Whether the body (or field value) has a specific type (e.g., if it is a JSONObject, a Number, ...)",
    "2. Whether it contains a field (e.g., if the JSONObject contains a field \"id\")",
    "3. Whether it is a list and contains an entry of a specific type",
    "4. Whether it is a list and contains an entry that contains a specific field",
    "5. Whether it is a list and all entries have a specific type",
    "6. Whether it is a list and all entries contain a specific field",
];
pub const ENTER_EXPECTED_TYPE: &str =
    "What type is expected? (e.g., JSONObject, JSONArray, String, Number, Boolean)";
pub const ENTER_FIELD_NAME: &str = "Please enter the field name/key:";
pub const ASSERTION_PREVIEW: &str = "The assertion now looks as follows:";
pub const OK: &str = "Ok.";

pub const NO_PROJECT_LINKED: &str = ":x:Error, no project is linked to this channel. :x:";
pub const NO_MICROSERVICE_IN_PROJECT: &str =
    ":x:Error, no microservice is part of the selected project. :x:";
pub const NO_OPERATIONS: &str = ":x:Error, the microservice does not offer any methods to test. :x:";
pub const ERROR_LOADING_PROJECTS: &str = ":x:Error, unable to load the projects of this channel. :x:";
pub const ERROR_LOADING_OPERATIONS: &str =
    ":x:Error, unable to load available methods of microservice. :x:";
pub const ERROR_GENERATING_CODE: &str = "Unfortunately, the test method code could not be generated.";
pub const GENERATED_CODE_INTRO: &str = "Here is the generated test method code:";
pub const MODELED_TEST_INTRO: &str = "Here is the modeled test:";

pub fn test_added_to_project(name: &str) -> String {
    format!("The test will be added to the project \"{name}\".")
}

pub fn test_added_to_microservice(name: &str) -> String {
    format!("The test will be added to the microservice \"{name}\".")
}

pub fn test_case_named(name: &str) -> String {
    format!("Test case will be named {name}.")
}

pub fn test_operation(method: &str, path: &str) -> String {
    format!("The test will send a `{method}` request to `{path}`.")
}

pub fn path_param_set(name: &str, value: &str) -> String {
    format!("Setting `{name}` to \"{value}\".")
}

pub fn enter_path_param(name: &str) -> String {
    format!("Please enter a value for the path parameter `{name}`:")
}

pub fn request_url(url: &str) -> String {
    format!("The request URL now is `{url}`.")
}

pub fn issue_request(method: &str, path: &str) -> String {
    format!("The test request will be `{method}` `{path}`.")
}

pub fn refine_field_question(field: &str) -> String {
    format!(
        "Do you want to further edit this assertion and assert something on the field \"{field}\"? \
         (e.g., check that the field has a specific type)"
    )
}
