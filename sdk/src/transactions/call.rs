use {
    crate::aptos::{
        EntryFunctionPayload,
        MoveFunctionId,
        MoveType,
        MoveValue,
        TransactionPayload,
    },
    serde::Serialize,
};

/// Describes one entry function invocation: which function, with which type
/// arguments and which arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryFunctionCall {
    pub function: MoveFunctionId,
    pub type_arguments: Vec<MoveType>,
    pub arguments: Vec<MoveValue>,
}

impl EntryFunctionCall {
    pub fn new(function: MoveFunctionId) -> Self {
        Self {
            function,
            type_arguments: vec![],
            arguments: vec![],
        }
    }

    pub fn with_type_argument(mut self, type_argument: MoveType) -> Self {
        self.type_arguments.push(type_argument);
        self
    }

    pub fn with_argument(mut self, argument: impl Into<MoveValue>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn payload(&self) -> TransactionPayload {
        TransactionPayload::EntryFunctionPayload(EntryFunctionPayload {
            function: self.function.clone(),
            type_arguments: self.type_arguments.clone(),
            arguments: self.arguments.clone(),
        })
    }
}

impl std::fmt::Display for EntryFunctionCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.function)?;

        if !self.type_arguments.is_empty() {
            let type_arguments = self
                .type_arguments
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>();

            write!(f, "<{}>", type_arguments.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::aptos::AccountAddress};

    #[test]
    fn test_call_builder_and_display() {
        let call = EntryFunctionCall::new("0x1::coin::transfer".parse().unwrap())
            .with_type_argument(MoveType::aptos_coin())
            .with_argument(AccountAddress::ONE)
            .with_argument(10u64);

        assert_eq!(
            call.to_string(),
            "0x1::coin::transfer<0x1::aptos_coin::AptosCoin>"
        );
        assert_eq!(call.arguments, vec![MoveValue::Address(AccountAddress::ONE), MoveValue::U64(10)]);

        let TransactionPayload::EntryFunctionPayload(payload) = call.payload();

        assert_eq!(payload.function, call.function);
        assert_eq!(payload.arguments.len(), 2);
    }
}
