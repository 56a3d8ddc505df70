//! Calculator endpoints: multiply, currentGrade, cashier.
//!
//! All three are pure functions from decoded query parameters to a
//! [`Reply`]. Their status and body texts are load-bearing: missing keys
//! are 400 with a usage hint, present-but-unparseable values are 406.

use crate::http::{
    query::QueryParams,
    response::Reply,
    types::StatusCode,
};

// currentGrade weight constants: points earned out of each total.
const ASSIGN_TOTAL: f64 = 600.0;
const QUIZ_TOTAL: f64 = 100.0;
const EXAM_TOTAL: f64 = 300.0;

/// `multiply?num1=3&num2=4` - multiplies two integers.
pub(crate) fn multiply(params: &QueryParams) -> Reply {
    if params.is_empty() || !params.contains_key("num1") || !params.contains_key("num2") {
        return Reply::html(
            StatusCode::BadRequest,
            "Error Code 400: Please enter two query parameters, e.g. num1=1&num2=2\n",
        );
    }

    let parsed = (
        params.get("num1").unwrap_or_default().parse::<i64>(),
        params.get("num2").unwrap_or_default().parse::<i64>(),
    );
    match parsed {
        (Ok(num1), Ok(num2)) => {
            // Wrapping keeps parity with the reference's fixed-width ints.
            let result = num1.wrapping_mul(num2);
            Reply::html(StatusCode::Ok, format!("Result is: {result}"))
        }
        _ => Reply::html(
            StatusCode::NotAcceptable,
            "Error Code 406: Please enter integer values only.\n",
        ),
    }
}

/// `currentGrade?assign=540&quiz=85&exam=200` - course grade calculator.
///
/// `assign` and `quiz` are required, `exam` defaults to 0. The three 400
/// branches are deliberately distinct: no parameters at all, missing
/// `assign`, and missing `quiz` each get their own hint.
pub(crate) fn current_grade(params: &QueryParams) -> Reply {
    if params.is_empty() {
        return Reply::html(
            StatusCode::BadRequest,
            "Please enter at least the assignment and quiz parameters, e.g. assign=540&quiz=85\n",
        );
    }
    if !params.contains_key("assign") {
        return Reply::html(
            StatusCode::BadRequest,
            "Please enter the assignment parameter, e.g. assign=540\n",
        );
    }
    if !params.contains_key("quiz") {
        return Reply::html(
            StatusCode::BadRequest,
            "Please enter the quiz parameter, e.g. quiz=85\n",
        );
    }

    let parsed = (
        params.get("assign").unwrap_or_default().parse::<f64>(),
        params.get("quiz").unwrap_or_default().parse::<f64>(),
        match params.get("exam") {
            Some(exam) => exam.parse::<f64>(),
            None => Ok(0.0),
        },
    );
    match parsed {
        (Ok(assign), Ok(quiz), Ok(exam)) => {
            let grade = assign / ASSIGN_TOTAL * 60.0
                + quiz / QUIZ_TOTAL * 10.0
                + exam / EXAM_TOTAL * 30.0;

            Reply::html(
                StatusCode::Ok,
                format!(
                    "Calculation is: {grade}     CURRENT GRADE: {}\n",
                    letter_grade(grade)
                ),
            )
        }
        _ => Reply::html(
            StatusCode::NotAcceptable,
            "Please enter number values only.\n",
        ),
    }
}

fn letter_grade(grade: f64) -> &'static str {
    match grade {
        g if g >= 97.0 => "A+",
        g if g >= 93.0 => "A",
        g if g >= 90.0 => "A-",
        g if g >= 87.0 => "B+",
        g if g >= 83.0 => "B",
        g if g >= 80.0 => "B-",
        g if g >= 77.0 => "C+",
        g if g >= 73.0 => "C",
        g if g >= 70.0 => "C-",
        g if g >= 67.0 => "D+",
        g if g >= 63.0 => "D",
        g if g >= 60.0 => "D-",
        _ => "F",
    }
}

/// `cashier?price=21.50&paid=22.00` - greedy change decomposition.
///
/// Values are parsed before the non-negativity check, so non-numeric input
/// is 406 and numeric negatives are 400. The currency math stays in f64 and
/// decomposes greedily in the fixed order quarters, dimes, nickels, pennies.
pub(crate) fn cashier(params: &QueryParams) -> Reply {
    if params.is_empty() || !params.contains_key("price") || !params.contains_key("paid") {
        return Reply::html(
            StatusCode::BadRequest,
            "Please enter the price and paid parameters, e.g. price=21.50&paid=22.00\n",
        );
    }

    let parsed = (
        params.get("price").unwrap_or_default().parse::<f64>(),
        params.get("paid").unwrap_or_default().parse::<f64>(),
    );
    let (price, paid) = match parsed {
        (Ok(price), Ok(paid)) => (price, paid),
        _ => {
            return Reply::html(
                StatusCode::NotAcceptable,
                "Please enter number values only.\n",
            )
        }
    };

    if price < 0.0 || paid < 0.0 {
        return Reply::html(
            StatusCode::BadRequest,
            "Please enter values that are equal to or greater than 0.00\n",
        );
    }

    let change = paid - price;
    if change < 0.0 {
        // Underpayment is an answer, not an error.
        return Reply::html(
            StatusCode::Ok,
            "The payment is not enough, please try again!\n",
        );
    }

    let mut coins = change;
    let quarters = take_coin(&mut coins, 0.25);
    let dimes = take_coin(&mut coins, 0.10);
    let nickels = take_coin(&mut coins, 0.05);
    let pennies = take_coin(&mut coins, 0.01);

    Reply::html(
        StatusCode::Ok,
        format!(
            "The change is: {change} Distribute coins: Quarters - {quarters} \
             Dimes - {dimes} Nickels - {nickels} Pennies - {pennies}\n"
        ),
    )
}

// Clamped at zero so float dust below a denomination can never go negative.
fn take_coin(coins: &mut f64, denomination: f64) -> i64 {
    let count = (*coins / denomination).floor().max(0.0);
    *coins -= count * denomination;
    count as i64
}
