use errors::FunctionError;
use types::Value;

/// Bind the filter input and explicit arguments to `N` slots
///
/// A non-null `input` takes the first slot and the explicit arguments fill
/// the rest. A null `input` leaves every slot to the explicit arguments.
/// Extra arguments are ignored, a missing or null slot is an
/// [FunctionError::ArgumentCount] failure.
pub fn bind_args<const N: usize>(
    input: Value,
    args: Vec<Value>,
) -> Result<[Value; N], FunctionError> {
    let with_input = !input.is_null();
    let count_error = FunctionError::ArgumentCount {
        expected: N,
        with_input,
    };

    let slots: Vec<Value> = if with_input {
        std::iter::once(input).chain(args).take(N).collect()
    } else {
        args.into_iter().take(N).collect()
    };

    if slots.iter().any(Value::is_null) {
        return Err(count_error);
    }

    slots.try_into().map_err(|_| count_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<Value> {
        values.iter().map(|value| Value::from(*value)).collect()
    }

    #[test]
    fn input_takes_first_slot() {
        let [a, b] = bind_args::<2>("head".into(), strings(&["arg"])).unwrap();

        assert_eq!(Value::from("head"), a);
        assert_eq!(Value::from("arg"), b);
    }

    #[test]
    fn null_input_uses_arguments() {
        let [a, b] = bind_args::<2>(Value::Null, strings(&["x", "y", "z"])).unwrap();

        assert_eq!(Value::from("x"), a);
        assert_eq!(Value::from("y"), b);
    }

    #[test]
    fn empty_string_input_is_bound() {
        let [a, b] = bind_args::<2>("".into(), strings(&["[@]"])).unwrap();

        assert_eq!(Value::from(""), a);
        assert_eq!(Value::from("[@]"), b);
    }

    #[test]
    fn missing_slot_with_input() {
        assert_eq!(
            Err(FunctionError::ArgumentCount {
                expected: 2,
                with_input: true
            }),
            bind_args::<2>("head".into(), vec![])
        );
    }

    #[test]
    fn missing_slot_without_input() {
        assert_eq!(
            Err(FunctionError::ArgumentCount {
                expected: 2,
                with_input: false
            }),
            bind_args::<2>(Value::Null, strings(&["x"]))
        );
    }

    #[test]
    fn null_argument_is_missing() {
        assert_eq!(
            Err(FunctionError::ArgumentCount {
                expected: 1,
                with_input: false
            }),
            bind_args::<1>(Value::Null, vec![Value::Null])
        );
    }
}
